//! Free-text filtering over the fetched entry list.
//!
//! The filter owns a per-entry visibility mask; the entries themselves are
//! never touched. A new list identity resets the filter to show everything.

use crate::model::Entry;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilter {
    text: String,
    visible: Vec<bool>,
    error: bool,
}

impl ListFilter {
    /// Resets for a freshly fetched list: empty text, everything visible.
    pub fn reset(&mut self, count: usize) {
        self.text.clear();
        self.visible = vec![true; count];
        self.error = false;
    }

    /// Recomputes the visibility mask for new filter text.
    ///
    /// A per-entry failure (the mask and the list disagreeing on length is
    /// the only one possible here) flags the component-level error and the
    /// pass continues for the remaining entries.
    pub fn apply(&mut self, text: &str, entries: &[Entry]) {
        self.text = text.to_owned();
        let mut visible = vec![false; self.visible.len()];
        for (index, slot) in visible.iter_mut().enumerate() {
            if let Some(entry) = entries.get(index) {
                *slot = entry_matches(entry, text);
            } else {
                self.error = true;
            }
        }
        self.visible = visible;
    }

    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn error(&self) -> bool {
        self.error
    }
}

/// The matching policy, case-insensitive throughout: empty text matches
/// everything; otherwise the text (spaces normalized to hyphens) may be a
/// prefix of any tag, a substring of the name or street, or a prefix of the
/// category.
fn entry_matches(entry: &Entry, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();
    let tag_needle = needle.replace(' ', "-");
    if entry
        .tags
        .iter()
        .any(|tag| tag.to_lowercase().starts_with(&tag_needle))
    {
        return true;
    }
    entry.name.to_lowercase().contains(&needle)
        || entry.street.to_lowercase().contains(&needle)
        || entry.category.as_str().starts_with(&needle)
}
