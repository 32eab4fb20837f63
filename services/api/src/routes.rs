use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use crisis_rescue::api::{api_router, AppServices};
use serde_json::json;

pub(crate) fn with_api_routes(services: AppServices) -> axum::Router {
    api_router(services)
        .route("/", axum::routing::get(root))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "status": "Backend running",
        "service": "Live Crisis Rescue System",
    }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use crisis_rescue::geo::RouteQuery;
    use crisis_rescue::requests::CsvRequestStore;
    use crisis_rescue::routing::{RouteProvider, RouteProviderError, RouteResult, RoutingService};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct OfflineProvider;

    #[async_trait::async_trait]
    impl RouteProvider for OfflineProvider {
        async fn fetch_route(
            &self,
            _query: &RouteQuery,
        ) -> Result<RouteResult, RouteProviderError> {
            Err(RouteProviderError::NoRoute)
        }
    }

    fn app_state(ready: bool) -> AppState {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(handle),
        }
    }

    fn app(dir: &tempfile::TempDir, state: AppState) -> axum::Router {
        let routing = Arc::new(RoutingService::uncached(Arc::new(OfflineProvider)));
        let store = Arc::new(CsvRequestStore::new(dir.path().join("requests.csv")));
        with_api_routes(AppServices::new(routing, store)).layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn root_describes_the_service() {
        let Json(body) = root().await;
        assert_eq!(body["status"], "Backend running");
        assert_eq!(body["service"], "Live Crisis Rescue System");
    }

    #[tokio::test]
    async fn readiness_tracks_the_flag() {
        let state = app_state(false);
        let response = readiness_endpoint(Extension(state.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.readiness.store(true, Ordering::Release);
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn service_and_api_routes_share_one_router() {
        let dir = tempfile::tempdir().expect("tempdir");
        let router = app(&dir, app_state(true));

        let ready = router
            .clone()
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route runs");
        assert_eq!(ready.status(), StatusCode::OK);

        let route = router
            .clone()
            .oneshot(
                Request::get("/api/route?start_lon=77.2&start_lat=28.6&end_lon=77.3&end_lat=28.5")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route runs");
        assert_eq!(body_json(route).await["fallback"], true);

        let metrics = router
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request"))
            .await
            .expect("route runs");
        assert_eq!(metrics.status(), StatusCode::OK);
    }
}
