use serde::{Deserialize, Serialize};

use crate::model::{AppConfig, EntryId};

/// Raw (status + bytes) outcome of an outbound query. Decoding happens in the
/// update loop so that shape errors surface as application errors.
pub type HttpResult = crux_http::Result<crux_http::Response<Vec<u8>>>;

/// Everything that can happen to the app: user intents, shell signals, and
/// capability responses. The response variants never cross the FFI boundary,
/// hence `#[serde(skip)]`.
#[derive(Serialize, Deserialize)]
pub enum Event {
    /// Shell start-up: injected configuration plus the viewport width at
    /// mount, from which the initial layout mode is derived.
    Started {
        config: AppConfig,
        viewport_width: u32,
    },
    /// A new city/state search was submitted.
    SearchSubmitted { city: String, state: String },
    /// The filter input's text changed.
    FilterChanged { text: String },
    /// A list row was activated.
    EntrySelected { id: EntryId },
    /// The back control in the compact detail pane was pressed.
    BackPressed,
    /// The shell's resize listener fired.
    ViewportResized { width: u32 },

    #[serde(skip)]
    DirectoryResponse(Box<HttpResult>),
    #[serde(skip)]
    GeocodeResponse {
        entry_id: EntryId,
        epoch: u64,
        response: Box<HttpResult>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Started { .. } => "started",
            Self::SearchSubmitted { .. } => "search_submitted",
            Self::FilterChanged { .. } => "filter_changed",
            Self::EntrySelected { .. } => "entry_selected",
            Self::BackPressed => "back_pressed",
            Self::ViewportResized { .. } => "viewport_resized",
            Self::DirectoryResponse(_) => "directory_response",
            Self::GeocodeResponse { .. } => "geocode_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_size_is_reasonable() {
        let size = std::mem::size_of::<Event>();
        assert!(
            size <= 128,
            "Event enum is {size} bytes — too large, box more variants"
        );
    }

    #[test]
    fn shell_events_round_trip_through_json() {
        let event = Event::EntrySelected { id: EntryId(5494) };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name(), "entry_selected");
    }
}
