use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::{RescueRequest, RescueSubmission};
use super::store::{RequestStore, StoreError};
use crate::geo::CoordinateError;
use crate::priority::priority_for_resource;
use crate::routing::{RouteSource, RoutingService};
use crate::units::is_non_empty;

/// Accepts rescue submissions: route, prioritise, persist.
pub struct RescueRequestService {
    routing: Arc<RoutingService>,
    store: Arc<dyn RequestStore>,
}

/// What the caller gets back for an accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReceipt {
    pub request: RescueRequest,
    pub route_source: RouteSource,
}

#[derive(Debug, thiserror::Error)]
pub enum RescueServiceError {
    #[error(transparent)]
    InvalidCoordinates(#[from] CoordinateError),
    #[error("request type must not be empty")]
    MissingType,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("request log worker stopped: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl RescueRequestService {
    pub fn new(routing: Arc<RoutingService>, store: Arc<dyn RequestStore>) -> Self {
        Self { routing, store }
    }

    pub async fn submit(
        &self,
        submission: RescueSubmission,
    ) -> Result<SubmissionReceipt, RescueServiceError> {
        let query = submission.route_query()?;
        if !is_non_empty(&submission.request_type) {
            return Err(RescueServiceError::MissingType);
        }

        let lookup = self.routing.lookup(&query).await;
        let request_type = submission.request_type.trim().to_string();
        let priority = submission
            .priority
            .unwrap_or_else(|| priority_for_resource(&request_type));

        let request = RescueRequest::from_route(
            submission.donor_id,
            request_type,
            priority,
            &query,
            &lookup.route,
        );
        // The log write is blocking file IO behind a mutex; keep it off the async workers.
        let store = Arc::clone(&self.store);
        let request = tokio::task::spawn_blocking(move || {
            store.append(&request).map(|()| request)
        })
        .await??;

        info!(
            priority = %request.priority,
            distance_km = request.distance_km,
            eta_min = request.eta_min,
            route_source = lookup.source.label(),
            "rescue request stored"
        );

        Ok(SubmissionReceipt {
            request,
            route_source: lookup.source,
        })
    }

    pub async fn list(&self) -> Result<Vec<RescueRequest>, RescueServiceError> {
        let store = Arc::clone(&self.store);
        Ok(tokio::task::spawn_blocking(move || store.list()).await??)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::RouteQuery;
    use crate::priority::Priority;
    use crate::routing::{RouteProvider, RouteProviderError, RouteResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedProvider(Option<RouteResult>);

    #[async_trait]
    impl RouteProvider for FixedProvider {
        async fn fetch_route(
            &self,
            _query: &RouteQuery,
        ) -> Result<RouteResult, RouteProviderError> {
            self.0.clone().ok_or(RouteProviderError::Timeout)
        }
    }

    #[derive(Default)]
    struct MemoryStore(Mutex<Vec<RescueRequest>>);

    impl RequestStore for MemoryStore {
        fn append(&self, request: &RescueRequest) -> Result<(), StoreError> {
            self.0.lock().expect("store mutex poisoned").push(request.clone());
            Ok(())
        }

        fn list(&self) -> Result<Vec<RescueRequest>, StoreError> {
            Ok(self.0.lock().expect("store mutex poisoned").clone())
        }
    }

    struct BrokenStore;

    impl RequestStore for BrokenStore {
        fn append(&self, _request: &RescueRequest) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "requests.csv".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn list(&self) -> Result<Vec<RescueRequest>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn service_with(
        route: Option<RouteResult>,
        store: Arc<dyn RequestStore>,
    ) -> RescueRequestService {
        let routing = Arc::new(RoutingService::uncached(Arc::new(FixedProvider(route))));
        RescueRequestService::new(routing, store)
    }

    fn submission(request_type: &str, priority: Option<Priority>) -> RescueSubmission {
        RescueSubmission {
            donor_id: Some("D2".to_string()),
            request_type: request_type.to_string(),
            priority,
            start_lon: 77.209,
            start_lat: 28.6139,
            end_lon: 77.2432,
            end_lat: 28.5677,
        }
    }

    #[tokio::test]
    async fn submission_derives_priority_from_type_when_absent() {
        let store = Arc::new(MemoryStore::default());
        let service = service_with(
            Some(RouteResult {
                distance_meters: 8421.4,
                duration_seconds: 905.0,
                geometry: None,
            }),
            store.clone(),
        );

        let receipt = service
            .submit(submission("Medicine", None))
            .await
            .expect("submission accepted");

        assert_eq!(receipt.route_source, RouteSource::Live);
        assert_eq!(receipt.request.priority, Priority::High);
        assert_eq!(receipt.request.distance_km, 8.42);
        assert_eq!(receipt.request.eta_min, 15.08);
        assert_eq!(store.list().expect("list"), vec![receipt.request]);
    }

    #[tokio::test]
    async fn explicit_priority_is_kept() {
        let store = Arc::new(MemoryStore::default());
        let service = service_with(None, store);

        let receipt = service
            .submit(submission("food", Some(Priority::Critical)))
            .await
            .expect("submission accepted");

        assert_eq!(receipt.request.priority, Priority::Critical);
        assert_eq!(receipt.route_source, RouteSource::Fallback);
        assert_eq!(receipt.request.distance_km, 5.0);
        assert_eq!(receipt.request.eta_min, 10.0);
    }

    #[tokio::test]
    async fn invalid_coordinates_are_rejected_before_routing() {
        let store = Arc::new(MemoryStore::default());
        let service = service_with(None, store.clone());
        let mut bad = submission("food", None);
        bad.start_lat = 95.0;

        let err = service.submit(bad).await.expect_err("rejected");
        assert!(matches!(err, RescueServiceError::InvalidCoordinates(_)));
        assert!(store.list().expect("list").is_empty());
    }

    #[tokio::test]
    async fn blank_type_is_rejected() {
        let service = service_with(None, Arc::new(MemoryStore::default()));
        let err = service
            .submit(submission("  ", None))
            .await
            .expect_err("rejected");
        assert!(matches!(err, RescueServiceError::MissingType));
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let service = service_with(None, Arc::new(BrokenStore));
        let err = service
            .submit(submission("food", None))
            .await
            .expect_err("store failure surfaces");
        assert!(matches!(err, RescueServiceError::Store(_)));
    }

    #[tokio::test]
    async fn listing_serves_exactly_what_was_accepted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Arc::new(crate::requests::CsvRequestStore::new(
            dir.path().join("requests.csv"),
        ));
        let service = service_with(None, store);

        let mut padded = submission("food", None);
        padded.donor_id = Some("  D1 ".to_string());
        let mut blank = submission("medicine", None);
        blank.donor_id = Some(" ".to_string());

        let first = service.submit(padded).await.expect("accepted");
        let second = service.submit(blank).await.expect("accepted");

        assert_eq!(first.request.donor_id.as_deref(), Some("D1"));
        assert_eq!(second.request.donor_id, None);
        assert_eq!(
            service.list().await.expect("log readable"),
            vec![first.request, second.request]
        );
    }
}
