//! HTTP surface mounted under `/api`.

mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::registry::{Directory, VehicleRegistry};
use crate::requests::{CsvRequestStore, RequestStore, RescueRequestService};
use crate::routing::{OsrmClient, RouteCache, RoutingService};

pub use handlers::{RouteParams, RouteView};

/// Process-scoped services shared by every handler.
#[derive(Clone)]
pub struct AppServices {
    pub routing: Arc<RoutingService>,
    pub requests: Arc<RescueRequestService>,
    pub vehicles: Arc<VehicleRegistry>,
    pub directory: Arc<Directory>,
}

impl AppServices {
    /// Wires the given routing and storage with the seeded fleet and partner directory.
    pub fn new(routing: Arc<RoutingService>, store: Arc<dyn RequestStore>) -> Self {
        let requests = Arc::new(RescueRequestService::new(routing.clone(), store));
        Self {
            routing,
            requests,
            vehicles: Arc::new(VehicleRegistry::seeded()),
            directory: Arc::new(Directory::seeded()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let provider = Arc::new(OsrmClient::from_config(&config.routing)?);
        let cache = RouteCache::from_config(&config.routing);
        let routing = Arc::new(RoutingService::new(provider, cache));
        let store = Arc::new(CsvRequestStore::new(config.storage.requests_path.clone()));
        Ok(Self::new(routing, store))
    }
}

/// Router builder exposing the routing, request, fleet and directory endpoints.
pub fn api_router(services: AppServices) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/route", get(handlers::route_lookup))
        .route("/api/request", post(handlers::submit_request))
        .route("/api/requests", get(handlers::list_requests))
        .route("/api/vehicles", get(handlers::list_vehicles))
        .route(
            "/api/vehicle-breakdown/:vehicle_id",
            post(handlers::vehicle_breakdown),
        )
        .route("/api/active-vehicle", get(handlers::active_vehicle))
        .route("/api/donors", get(handlers::list_donors))
        .route("/api/ngos", get(handlers::list_ngos))
        .route("/api/items/assess", post(handlers::assess_items))
        .with_state(services)
}
