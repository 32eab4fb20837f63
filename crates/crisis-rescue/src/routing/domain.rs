use serde::{Deserialize, Serialize};

use crate::units::{meters_to_km, seconds_to_minutes};

/// GeoJSON LineString as returned by the routing backend, `[lon, lat]` per vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteGeometry {
    pub fn line_string(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            kind: "LineString".to_string(),
            coordinates,
        }
    }

    /// Vertices flipped to `[lat, lon]`, the order map renderers expect.
    pub fn lat_lon_path(&self) -> Vec<[f64; 2]> {
        self.coordinates
            .iter()
            .map(|[lon, lat]| [*lat, *lon])
            .collect()
    }
}

/// Distance, duration and path of a single driving route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: Option<RouteGeometry>,
}

impl RouteResult {
    pub const FALLBACK_DISTANCE_METERS: f64 = 5000.0;
    pub const FALLBACK_DURATION_SECONDS: f64 = 600.0;

    /// Substitute returned whenever the backend cannot produce a route.
    pub fn fallback() -> Self {
        Self {
            distance_meters: Self::FALLBACK_DISTANCE_METERS,
            duration_seconds: Self::FALLBACK_DURATION_SECONDS,
            geometry: None,
        }
    }

    pub fn distance_km(&self) -> f64 {
        meters_to_km(self.distance_meters)
    }

    pub fn eta_min(&self) -> f64 {
        seconds_to_minutes(self.duration_seconds)
    }
}

/// Where a looked-up route came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    Live,
    Cached,
    Fallback,
}

impl RouteSource {
    pub fn label(&self) -> &'static str {
        match self {
            RouteSource::Live => "live",
            RouteSource::Cached => "cached",
            RouteSource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteLookup {
    pub route: RouteResult,
    pub source: RouteSource,
}

impl RouteLookup {
    pub fn is_fallback(&self) -> bool {
        self.source == RouteSource::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_five_km_ten_minutes() {
        let fallback = RouteResult::fallback();
        assert_eq!(fallback.distance_meters, 5000.0);
        assert_eq!(fallback.duration_seconds, 600.0);
        assert!(fallback.geometry.is_none());
        assert_eq!(fallback.distance_km(), 5.0);
        assert_eq!(fallback.eta_min(), 10.0);
    }

    #[test]
    fn geometry_deserializes_from_geojson_and_flips_for_maps() {
        let geometry: RouteGeometry = serde_json::from_str(
            r#"{"type":"LineString","coordinates":[[77.209,28.6139],[77.2432,28.5677]]}"#,
        )
        .expect("geojson parses");
        assert_eq!(geometry.kind, "LineString");
        assert_eq!(
            geometry.lat_lon_path(),
            vec![[28.6139, 77.209], [28.5677, 77.2432]]
        );
    }
}
