#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

//! Headless application core for a brewery directory viewer.
//!
//! The crate holds all of the application's logic — fetching a list of
//! breweries for a city/state, free-text filtering, selection and responsive
//! layout coordination, and resolving a map coordinate for the selected entry
//! (embedded coordinates when usable, a geocoding fallback otherwise). Shells
//! (web, mobile) own the actual rendering and event listeners; they feed
//! [`Event`]s in and render the [`ViewModel`] that comes back out.

pub mod app;
pub mod capabilities;
pub mod event;
pub mod filter;
pub mod model;
pub mod resolver;
pub mod states;
pub mod view;

use serde::{Deserialize, Serialize};

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use event::Event;
pub use model::{
    AppConfig, Coordinate, Entry, EntryId, Model, ResolutionState, ResolutionStatus, ViewMode,
};
pub use view::ViewModel;

/// Viewport widths below this render as a single pane.
pub const COMPACT_BREAKPOINT: u32 = 576;
/// Zoom level for the detail map.
pub const DEFAULT_MAP_ZOOM: f64 = 18.0;
/// Where the map pin lands before (or instead of) a real coordinate.
pub const DEFAULT_CENTER_LAT: f64 = 39.744;
pub const DEFAULT_CENTER_LNG: f64 = -77.088;

pub const DEFAULT_DIRECTORY_URL: &str = "https://api.openbrewerydb.org/breweries";
pub const DEFAULT_GEOCODING_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The request was rejected, timed out, or came back non-2xx.
    Network,
    /// The response arrived but its JSON was not the expected shape.
    MalformedResponse,
    /// Input was rejected before a request was ever issued.
    Validation,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::MalformedResponse => "MALFORMED_RESPONSE",
            Self::Validation => "VALIDATION_ERROR",
        }
    }
}

/// Application-level error carried on the model and surfaced as a banner.
///
/// Non-numeric coordinate fields are deliberately *not* represented here:
/// they are the normal trigger for the geocoding fallback, not an error
/// (see [`model::Entry::embedded_coordinate`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub internal_message: Option<String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            internal_message: None,
        }
    }

    #[must_use]
    pub fn with_internal(mut self, internal: impl Into<String>) -> Self {
        self.internal_message = Some(internal.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(internal) = &self.internal_message {
            write!(f, " (internal: {internal})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}
