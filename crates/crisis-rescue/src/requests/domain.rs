use serde::{Deserialize, Serialize};

use crate::geo::{CoordinateError, RouteQuery};
use crate::priority::Priority;
use crate::routing::RouteResult;

/// Incoming rescue request as submitted by the dashboard.
///
/// Unknown fields are rejected rather than dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RescueSubmission {
    #[serde(default)]
    pub donor_id: Option<String>,
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    pub start_lon: f64,
    pub start_lat: f64,
    pub end_lon: f64,
    pub end_lat: f64,
}

impl RescueSubmission {
    pub fn route_query(&self) -> Result<RouteQuery, CoordinateError> {
        RouteQuery::from_raw(self.start_lon, self.start_lat, self.end_lon, self.end_lat)
    }
}

/// Persisted rescue request. Field order is the column order of the request log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescueRequest {
    pub donor_id: Option<String>,
    #[serde(rename = "type")]
    pub request_type: String,
    pub priority: Priority,
    pub start_lon: f64,
    pub start_lat: f64,
    pub end_lon: f64,
    pub end_lat: f64,
    pub distance_km: f64,
    pub eta_min: f64,
}

impl RescueRequest {
    pub const COLUMNS: [&'static str; 9] = [
        "donor_id",
        "type",
        "priority",
        "start_lon",
        "start_lat",
        "end_lon",
        "end_lat",
        "distance_km",
        "eta_min",
    ];

    /// Derives distance and ETA from `route` at submission time.
    ///
    /// The donor id is trimmed and a blank id is stored as absent, so the record reads back
    /// from the log exactly as written.
    pub fn from_route(
        donor_id: Option<String>,
        request_type: String,
        priority: Priority,
        query: &RouteQuery,
        route: &RouteResult,
    ) -> Self {
        let donor_id = donor_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        Self {
            donor_id,
            request_type,
            priority,
            start_lon: query.start.lon,
            start_lat: query.start.lat,
            end_lon: query.end.lon,
            end_lat: query.end.lat,
            distance_km: route.distance_km(),
            eta_min: route.eta_min(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_rejects_unknown_fields() {
        let payload = r#"{
            "type": "food",
            "start_lon": 77.2, "start_lat": 28.6,
            "end_lon": 77.3, "end_lat": 28.5,
            "vehicle": "V1"
        }"#;
        let err = serde_json::from_str::<RescueSubmission>(payload).expect_err("unknown field");
        assert!(err.to_string().contains("vehicle"));
    }

    #[test]
    fn submission_priority_and_donor_are_optional() {
        let payload = r#"{
            "type": "medicine",
            "start_lon": 77.2, "start_lat": 28.6,
            "end_lon": 77.3, "end_lat": 28.5
        }"#;
        let submission: RescueSubmission = serde_json::from_str(payload).expect("parses");
        assert!(submission.donor_id.is_none());
        assert!(submission.priority.is_none());
    }

    #[test]
    fn record_derives_rounded_distance_and_eta() {
        let query = RouteQuery::from_raw(77.2, 28.6, 77.3, 28.5).expect("valid query");
        let route = RouteResult {
            distance_meters: 12_345.678,
            duration_seconds: 1_000.0,
            geometry: None,
        };
        let record = RescueRequest::from_route(
            Some("D1".to_string()),
            "food".to_string(),
            Priority::Medium,
            &query,
            &route,
        );
        assert_eq!(record.distance_km, 12.35);
        assert_eq!(record.eta_min, 16.67);
        assert_eq!((record.start_lon, record.start_lat), (77.2, 28.6));
    }

    #[test]
    fn record_trims_donor_id_and_drops_blank_ones() {
        let query = RouteQuery::from_raw(77.2, 28.6, 77.3, 28.5).expect("valid query");
        let route = RouteResult::fallback();
        let build = |donor: &str| {
            RescueRequest::from_route(
                Some(donor.to_string()),
                "food".to_string(),
                Priority::Medium,
                &query,
                &route,
            )
            .donor_id
        };

        assert_eq!(build(" D1 "), Some("D1".to_string()));
        assert_eq!(build("   "), None);
        assert_eq!(build(""), None);
    }
}
