//! Shell-facing view model: a pure projection of the [`crate::Model`].
//!
//! Everything here is plain serializable data; the shell renders it without
//! consulting any other state.

use serde::{Deserialize, Serialize};

use crate::model::{Entry, EntryId};
use crate::states;

pub const LIST_ERROR_TEXT: &str = "Something went wrong while trying to find some breweries.";
pub const LOCATION_ERROR_TEXT: &str =
    "There was a problem with retrieving location data for this brewery";

/// Pictograph for a known directory tag; unknown tags fall back to their raw
/// text so nothing silently disappears.
#[must_use]
pub fn tag_glyph(tag: &str) -> Option<&'static str> {
    match tag {
        "dog-friendly" => Some("\u{1f436}"),  // 🐶
        "patio" => Some("\u{1f31e}"),         // 🌞
        "food-service" => Some("\u{1f37d}"),  // 🍽
        "food-trucks" => Some("\u{1f69a}"),   // 🚚
        "tours" => Some("\u{1f6b6}"),         // 🚶
        _ => None,
    }
}

/// Tags as a single row of pictographs, separators between (not after)
/// entries.
#[must_use]
pub fn format_tag_row(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| tag_glyph(tag).unwrap_or(tag.as_str()))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// `NNN-NNN-NNNN` when ten digits are present; `None` for an empty phone;
/// anything else passes through untouched rather than being mangled.
#[must_use]
pub fn format_phone(phone: &str) -> Option<String> {
    if phone.is_empty() {
        return None;
    }
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 10 {
        return Some(phone.to_owned());
    }
    Some(format!(
        "{}-{}-{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..10]
    ))
}

/// `city, ST ZIP5` — region abbreviated via the state table, falling back to
/// the raw region when it has no entry; postal code truncated to five.
#[must_use]
pub fn format_locality(entry: &Entry) -> String {
    let region = states::abbreviate(&entry.region).unwrap_or(entry.region.as_str());
    let zip: String = entry.postal_code.chars().take(5).collect();
    format!("{}, {} {}", entry.city, region, zip)
}

/// `street; city, ST ZIP5`, with the street and its separator omitted when
/// the street is empty.
#[must_use]
pub fn format_address(entry: &Entry) -> String {
    let locality = format_locality(entry);
    if entry.street.is_empty() {
        locality
    } else {
        format!("{}; {}", entry.street, locality)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryListItem {
    pub id: EntryId,
    pub name: String,
    pub category: String,
    pub street: String,
    pub locality: String,
    pub website_url: String,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum Banner {
    Info { message: String },
    Danger { message: String },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListPane {
    pub filter_text: String,
    pub items: Vec<EntryListItem>,
    pub is_loading: bool,
    pub banner: Option<Banner>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapView {
    /// A pin at the resolved (or stand-in) center. `resolving` is set while
    /// a geocoding request is still outstanding.
    Pin {
        lat: f64,
        lng: f64,
        zoom: f64,
        resolving: bool,
    },
    /// Resolution failed; render this banner in place of the map.
    Unavailable { message: String },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EntryDetail {
    pub id: EntryId,
    pub name: String,
    pub category: String,
    pub website_url: String,
    pub address: String,
    pub phone: Option<String>,
    pub tag_row: String,
    pub map: MapView,
    /// Only the compact layout navigates back; the expanded layout keeps the
    /// list alongside.
    pub show_back_control: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "pane", rename_all = "snake_case")]
pub enum CompactPane {
    List { list: ListPane },
    Detail { detail: EntryDetail },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum ViewState {
    /// One pane at a time: the list, or the detail with a back control.
    Compact { pane: CompactPane },
    /// List and detail side by side; the detail pane may be empty.
    Expanded {
        list: ListPane,
        detail: Option<EntryDetail>,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub state: ViewState,
    /// "city, state" as searched, for headings and the no-results banner.
    pub location_label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, EntryId};

    fn madtree() -> Entry {
        Entry {
            id: EntryId(5494),
            name: "MadTree Brewing".into(),
            category: Category::Regional,
            street: "3301 Madison Rd".into(),
            city: "Cincinnati".into(),
            region: "Ohio".into(),
            postal_code: "45209-1132".into(),
            country: "United States".into(),
            longitude: "-84.4239715".into(),
            latitude: "39.1563725".into(),
            phone: "5138368733".into(),
            website_url: "http://www.madtreebrewing.com".into(),
            last_updated: "2018-08-24T15:44:22.281Z".into(),
            tags: vec!["patio".into()],
        }
    }

    #[test]
    fn formats_the_full_address() {
        assert_eq!(
            format_address(&madtree()),
            "3301 Madison Rd; Cincinnati, OH 45209"
        );
    }

    #[test]
    fn empty_street_drops_its_separator() {
        let mut entry = madtree();
        entry.street.clear();
        assert_eq!(format_address(&entry), "Cincinnati, OH 45209");
    }

    #[test]
    fn unknown_region_is_passed_through() {
        let mut entry = madtree();
        entry.region = "Puerto Rico".into();
        assert_eq!(
            format_address(&entry),
            "3301 Madison Rd; Cincinnati, Puerto Rico 45209"
        );
    }

    #[test]
    fn formats_a_ten_digit_phone() {
        assert_eq!(format_phone("5138368733"), Some("513-836-8733".into()));
    }

    #[test]
    fn empty_phone_formats_to_nothing() {
        assert_eq!(format_phone(""), None);
    }

    #[test]
    fn odd_length_phone_is_left_alone() {
        assert_eq!(format_phone("836-8733"), Some("836-8733".into()));
    }

    #[test]
    fn tag_row_separates_between_not_after() {
        let tags = vec!["patio".to_owned(), "tours".to_owned()];
        let row = format_tag_row(&tags);
        assert_eq!(row, "\u{1f31e} | \u{1f6b6}");
        assert!(!row.ends_with(" | "));
    }

    #[test]
    fn unknown_tag_keeps_its_text() {
        let tags = vec!["patio".to_owned(), "cask".to_owned()];
        assert_eq!(format_tag_row(&tags), "\u{1f31e} | cask");
    }

    #[test]
    fn single_tag_has_no_separator() {
        assert_eq!(format_tag_row(&["patio".to_owned()]), "\u{1f31e}");
    }
}
