use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::domain::{RouteGeometry, RouteResult};
use crate::config::RoutingConfig;
use crate::geo::RouteQuery;

/// Source of driving routes. Implementations report failures; substituting the fallback
/// route is the caller's decision.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn fetch_route(&self, query: &RouteQuery) -> Result<RouteResult, RouteProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RouteProviderError {
    #[error("failed to build routing client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("routing backend timed out")]
    Timeout,
    #[error("routing backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("routing backend answered with status {0}")]
    Status(u16),
    #[error("routing backend returned an unreadable body: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("routing backend returned no routes")]
    NoRoute,
    #[error("routing backend returned an invalid route: {0}")]
    Malformed(&'static str),
}

impl RouteProviderError {
    fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

/// HTTP client for OSRM-compatible `route/v1/driving` endpoints.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RouteProviderError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RouteProviderError::Client)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &RoutingConfig) -> Result<Self, RouteProviderError> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn route_url(&self, query: &RouteQuery) -> String {
        format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, query.start.lon, query.start.lat, query.end.lon, query.end.lat
        )
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    #[serde(default)]
    geometry: Option<RouteGeometry>,
}

impl OsrmRoute {
    fn into_result(self) -> Result<RouteResult, RouteProviderError> {
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(RouteProviderError::Malformed("distance must be a non-negative number"));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(RouteProviderError::Malformed("duration must be a non-negative number"));
        }

        Ok(RouteResult {
            distance_meters: self.distance,
            duration_seconds: self.duration,
            geometry: self.geometry,
        })
    }
}

#[async_trait]
impl RouteProvider for OsrmClient {
    async fn fetch_route(&self, query: &RouteQuery) -> Result<RouteResult, RouteProviderError> {
        let response = self
            .http
            .get(self.route_url(query))
            .send()
            .await
            .map_err(RouteProviderError::from_request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteProviderError::Status(status.as_u16()));
        }

        let body: OsrmResponse = response.json().await.map_err(|err| {
            if err.is_timeout() {
                RouteProviderError::Timeout
            } else {
                RouteProviderError::Decode(err)
            }
        })?;

        body.routes
            .into_iter()
            .next()
            .ok_or(RouteProviderError::NoRoute)?
            .into_result()
    }
}
