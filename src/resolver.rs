//! Geocoding fallback payload handling.
//!
//! The wire shape is the geocoding service's: a `results` array where each
//! element carries `geometry.location.{lat,lng}`. Only the first usable
//! result matters.

use serde::Deserialize;

use crate::model::Coordinate;
use crate::{AppError, ErrorKind};

#[derive(Debug, Deserialize)]
pub struct GeocodePayload {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: GeocodedLocation,
}

#[derive(Debug, Deserialize)]
pub struct GeocodedLocation {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodePayload {
    /// The first result's location, if it validates as a coordinate.
    #[must_use]
    pub fn first_location(&self) -> Option<Coordinate> {
        let location = &self.results.first()?.geometry.location;
        Coordinate::new(location.lat, location.lng).ok()
    }
}

/// Decodes a geocoding response body down to a single coordinate.
pub fn decode_payload(body: &[u8]) -> Result<Coordinate, AppError> {
    let payload: GeocodePayload = serde_json::from_slice(body).map_err(|e| {
        AppError::new(ErrorKind::MalformedResponse, "unexpected geocoding payload")
            .with_internal(e.to_string())
    })?;
    payload.first_location().ok_or_else(|| {
        AppError::new(
            ErrorKind::MalformedResponse,
            "geocoding returned no usable result",
        )
    })
}
