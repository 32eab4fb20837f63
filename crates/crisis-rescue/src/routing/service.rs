use std::sync::Arc;

use tracing::{debug, warn};

use super::cache::RouteCache;
use super::domain::{RouteLookup, RouteResult, RouteSource};
use super::provider::RouteProvider;
use crate::geo::RouteQuery;

/// Resolves route queries through the cache, then the provider, then the fallback route.
pub struct RoutingService {
    provider: Arc<dyn RouteProvider>,
    cache: Option<RouteCache>,
}

impl RoutingService {
    pub fn new(provider: Arc<dyn RouteProvider>, cache: RouteCache) -> Self {
        Self {
            provider,
            cache: Some(cache),
        }
    }

    /// Every lookup reaches the provider.
    pub fn uncached(provider: Arc<dyn RouteProvider>) -> Self {
        Self {
            provider,
            cache: None,
        }
    }

    pub fn cache(&self) -> Option<&RouteCache> {
        self.cache.as_ref()
    }

    /// Never fails: provider errors resolve to [`RouteResult::fallback`], which is not cached.
    pub async fn lookup(&self, query: &RouteQuery) -> RouteLookup {
        if let Some(route) = self.cache.as_ref().and_then(|cache| cache.get(query)) {
            debug!(key = %query.cache_key(), "route cache hit");
            return RouteLookup {
                route,
                source: RouteSource::Cached,
            };
        }

        match self.provider.fetch_route(query).await {
            Ok(route) => {
                if let Some(cache) = &self.cache {
                    cache.set(query, route.clone());
                }
                RouteLookup {
                    route,
                    source: RouteSource::Live,
                }
            }
            Err(error) => {
                warn!(key = %query.cache_key(), %error, "route lookup failed; using fallback route");
                RouteLookup {
                    route: RouteResult::fallback(),
                    source: RouteSource::Fallback,
                }
            }
        }
    }
}
