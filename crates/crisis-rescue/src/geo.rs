//! Coordinate validation and the route query key.

use serde::{Deserialize, Serialize};

/// Returns true when the pair lies on the globe. NaN and infinities are rejected.
pub fn is_valid_coordinates(lat: f64, lon: f64) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
}

/// Longitude/latitude pair in WGS84 degrees, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NotFinite { lon, lat });
        }
        if !is_valid_coordinates(lat, lon) {
            return Err(CoordinateError::OutOfRange { lon, lat });
        }
        Ok(Self { lon, lat })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("coordinates must be finite numbers (lon {lon}, lat {lat})")]
    NotFinite { lon: f64, lat: f64 },
    #[error("coordinates out of range (lon {lon}, lat {lat}); expected lat in [-90, 90] and lon in [-180, 180]")]
    OutOfRange { lon: f64, lat: f64 },
}

/// Start and end of a driving-route lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteQuery {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl RouteQuery {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    pub fn from_raw(
        start_lon: f64,
        start_lat: f64,
        end_lon: f64,
        end_lat: f64,
    ) -> Result<Self, CoordinateError> {
        Ok(Self {
            start: Coordinate::new(start_lon, start_lat)?,
            end: Coordinate::new(end_lon, end_lat)?,
        })
    }

    /// Stable string form of the four inputs, used as the route cache key.
    pub fn cache_key(&self) -> String {
        format!(
            "{},{}->{},{}",
            self.start.lon, self.start.lat, self.end.lon, self.end.lat
        )
    }
}
