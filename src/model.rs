use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::ListFilter;
use crate::{
    AppError, DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, DEFAULT_DIRECTORY_URL, DEFAULT_GEOCODING_URL,
    COMPACT_BREAKPOINT,
};

/// Upstream identifier for a directory entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The directory's fixed category vocabulary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Micro,
    Regional,
    Brewpub,
    Large,
    Planning,
    Bar,
    Contract,
    Proprietor,
    #[serde(other)]
    Unknown,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::Regional => "regional",
            Self::Brewpub => "brewpub",
            Self::Large => "large",
            Self::Planning => "planning",
            Self::Bar => "bar",
            Self::Contract => "contract",
            Self::Proprietor => "proprietor",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One directory record as returned by the listing API.
///
/// Source of truth is the upstream response; entries are never mutated
/// locally. Latitude and longitude stay strings because the upstream source
/// may supply empty or non-numeric placeholders — that is what makes the
/// geocoding fallback necessary in the first place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    #[serde(rename = "brewery_type")]
    pub category: Category,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(rename = "state", default)]
    pub region: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(rename = "updated_at", default)]
    pub last_updated: String,
    #[serde(rename = "tag_list", default)]
    pub tags: Vec<String>,
}

impl Entry {
    /// Parses the embedded coordinate fields, if both are usable.
    ///
    /// `None` is the expected outcome for entries with placeholder fields and
    /// is what routes resolution through the geocoding fallback.
    #[must_use]
    pub fn embedded_coordinate(&self) -> Option<Coordinate> {
        let lat = self.latitude.trim().parse::<f64>().ok()?;
        let lng = self.longitude.trim().parse::<f64>().ok()?;
        Coordinate::new(lat, lng).ok()
    }

    /// Composite free-text address for the geocoding fallback, with empty
    /// components (the street, most commonly) left out.
    #[must_use]
    pub fn address_query(&self) -> String {
        [
            self.street.as_str(),
            self.city.as_str(),
            self.region.as_str(),
            self.postal_code.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is out of valid range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is out of valid range [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("coordinate value is not finite")]
    NonFinite,
}

/// Validated, NaN-safe map coordinate.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

/// The documented fallback pin position.
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: DEFAULT_CENTER_LAT,
    lng: DEFAULT_CENTER_LNG,
};

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    #[must_use]
    pub const fn lng(self) -> f64 {
        self.lng
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        DEFAULT_CENTER
    }
}

// Bitwise equality, so a geocode commit that lands on the exact coordinate
// already held can be detected and skipped.
impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lng.to_bits() == other.lng.to_bits()
    }
}

impl Eq for Coordinate {}

/// Which layout the shell should draw, derived purely from viewport width.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewMode {
    Compact,
    #[default]
    Expanded,
}

impl ViewMode {
    #[must_use]
    pub const fn for_width(width: u32) -> Self {
        if width < COMPACT_BREAKPOINT {
            Self::Compact
        } else {
            Self::Expanded
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    Pending,
    Resolved,
    Failed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSource {
    /// Parsed straight from the entry's own fields.
    Embedded,
    /// Returned by the geocoding query.
    Geocoded,
    /// Nothing resolved yet; the default center stands in.
    Fallback,
}

/// Where the map should center for the currently selected entry.
///
/// Scoped to exactly one selection: changing selection always discards this
/// state, so a coordinate can never leak across entries. `Resolved` and
/// `Failed` are terminal for a given entry identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolutionState {
    pub entry_id: EntryId,
    pub center: Coordinate,
    pub source: CoordinateSource,
    pub status: ResolutionStatus,
}

impl ResolutionState {
    /// Both axes parsed: resolution completes synchronously.
    #[must_use]
    pub const fn resolved(entry_id: EntryId, center: Coordinate) -> Self {
        Self {
            entry_id,
            center,
            source: CoordinateSource::Embedded,
            status: ResolutionStatus::Resolved,
        }
    }

    /// A geocoding request is in flight; the default center stands in.
    #[must_use]
    pub const fn pending(entry_id: EntryId) -> Self {
        Self {
            entry_id,
            center: DEFAULT_CENTER,
            source: CoordinateSource::Fallback,
            status: ResolutionStatus::Pending,
        }
    }

    /// Commits a geocoded center, rewriting the held coordinate only when it
    /// actually differs.
    pub fn commit(&mut self, center: Coordinate) {
        self.status = ResolutionStatus::Resolved;
        self.source = CoordinateSource::Geocoded;
        if self.center != center {
            self.center = center;
        }
    }

    /// Marks the resolution failed; the held center is retained so the map
    /// still renders somewhere sane.
    pub fn fail(&mut self) {
        self.status = ResolutionStatus::Failed;
    }
}

/// Configuration injected by the shell at startup — never read from globals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geocoding API key; the empty string when the environment supplies none.
    #[serde(default)]
    pub geocoding_api_key: String,
    pub directory_url: String,
    pub geocoding_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            geocoding_api_key: String::new(),
            directory_url: DEFAULT_DIRECTORY_URL.to_owned(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_owned(),
        }
    }
}

/// The city/state a search was issued for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLocation {
    pub city: String,
    pub state: String,
}

impl SearchLocation {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

#[derive(Default)]
pub struct Model {
    pub config: AppConfig,
    pub search: Option<SearchLocation>,
    pub entries: Vec<Entry>,
    pub filter: ListFilter,
    pub selection: Option<EntryId>,
    pub view_mode: ViewMode,
    pub resolution: Option<ResolutionState>,
    /// Bumped whenever resolution (re)starts; in-flight geocoding requests
    /// carry the epoch they were issued under, and a response is committed
    /// only if its epoch is still current.
    pub resolve_epoch: u64,
    pub is_loading: bool,
    pub list_error: Option<AppError>,
}

impl Model {
    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn visible_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(index, _)| self.filter.is_visible(*index))
            .map(|(_, entry)| entry)
    }
}
