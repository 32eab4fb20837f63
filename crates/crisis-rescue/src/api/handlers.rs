use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::AppServices;
use crate::geo::RouteQuery;
use crate::registry::{assess_item, Item, ItemAssessment, VehicleId};
use crate::requests::{RescueServiceError, RescueSubmission};
use crate::routing::{RouteGeometry, RouteLookup, RouteSource};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RouteParams {
    pub start_lon: f64,
    pub start_lat: f64,
    pub end_lon: f64,
    pub end_lat: f64,
}

/// Route answer in dashboard units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteView {
    pub distance_km: f64,
    pub eta_min: f64,
    pub geometry: Option<RouteGeometry>,
    /// Geometry vertices as `[lat, lon]` for the map view.
    pub path: Option<Vec<[f64; 2]>>,
    pub source: RouteSource,
    pub fallback: bool,
}

impl From<RouteLookup> for RouteView {
    fn from(lookup: RouteLookup) -> Self {
        let fallback = lookup.is_fallback();
        let path = lookup.route.geometry.as_ref().map(RouteGeometry::lat_lon_path);
        Self {
            distance_km: lookup.route.distance_km(),
            eta_min: lookup.route.eta_min(),
            geometry: lookup.route.geometry,
            path,
            source: lookup.source,
            fallback,
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, Json(payload)).into_response()
}

pub(crate) async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "system": "Live Crisis Adaptation enabled",
    }))
}

pub(crate) async fn route_lookup(
    State(services): State<AppServices>,
    Query(params): Query<RouteParams>,
) -> Response {
    let query = match RouteQuery::from_raw(
        params.start_lon,
        params.start_lat,
        params.end_lon,
        params.end_lat,
    ) {
        Ok(query) => query,
        Err(error) => return error_response(StatusCode::BAD_REQUEST, error.to_string()),
    };

    let lookup = services.routing.lookup(&query).await;
    (StatusCode::OK, Json(RouteView::from(lookup))).into_response()
}

pub(crate) async fn submit_request(
    State(services): State<AppServices>,
    Json(submission): Json<RescueSubmission>,
) -> Response {
    match services.requests.submit(submission).await {
        Ok(receipt) => {
            let payload = json!({
                "message": "request stored",
                "data": receipt.request,
                "route_source": receipt.route_source,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(
            error @ (RescueServiceError::InvalidCoordinates(_) | RescueServiceError::MissingType),
        ) => error_response(StatusCode::BAD_REQUEST, error.to_string()),
        Err(error @ (RescueServiceError::Store(_) | RescueServiceError::Worker(_))) => {
            tracing::error!(%error, "failed to persist rescue request");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}

pub(crate) async fn list_requests(State(services): State<AppServices>) -> Response {
    match services.requests.list().await {
        Ok(requests) => (StatusCode::OK, Json(requests)).into_response(),
        Err(error) => error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
    }
}

pub(crate) async fn list_vehicles(State(services): State<AppServices>) -> Response {
    (StatusCode::OK, Json(services.vehicles.list())).into_response()
}

pub(crate) async fn vehicle_breakdown(
    State(services): State<AppServices>,
    Path(vehicle_id): Path<String>,
) -> Response {
    let id = VehicleId(vehicle_id);
    match services.vehicles.set_broken(&id) {
        Ok(vehicle) => {
            let payload = json!({
                "message": format!("Vehicle {} broken", vehicle.id),
                "vehicle": vehicle,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(StatusCode::NOT_FOUND, error.to_string()),
    }
}

pub(crate) async fn active_vehicle(State(services): State<AppServices>) -> Response {
    match services.vehicles.pick_available() {
        Ok(vehicle) => (StatusCode::OK, Json(vehicle)).into_response(),
        Err(error) => error_response(StatusCode::NOT_FOUND, error.to_string()),
    }
}

pub(crate) async fn list_donors(State(services): State<AppServices>) -> Response {
    (StatusCode::OK, Json(services.directory.donors().to_vec())).into_response()
}

pub(crate) async fn list_ngos(State(services): State<AppServices>) -> Response {
    (StatusCode::OK, Json(services.directory.ngos().to_vec())).into_response()
}

pub(crate) async fn assess_items(Json(items): Json<Vec<Item>>) -> Json<Vec<ItemAssessment>> {
    let now = Utc::now();
    let today = Local::now().date_naive();
    Json(
        items
            .into_iter()
            .map(|item| assess_item(item, now, today))
            .collect(),
    )
}
