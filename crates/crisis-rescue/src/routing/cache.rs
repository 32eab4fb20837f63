use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::domain::RouteResult;
use crate::config::RoutingConfig;
use crate::geo::RouteQuery;

/// Process-scoped memo of route lookups keyed by [`RouteQuery::cache_key`].
///
/// Holds at most `max_entries` routes; the oldest insertion is evicted first. With a TTL,
/// entries older than the TTL read as absent and are dropped on access.
#[derive(Debug)]
pub struct RouteCache {
    state: Mutex<CacheState>,
    max_entries: usize,
    ttl: Option<Duration>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CachedRoute>,
    order: VecDeque<String>,
}

#[derive(Debug)]
struct CachedRoute {
    route: RouteResult,
    stored_at: Instant,
}

impl CacheState {
    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|existing| existing != key);
        }
    }
}

impl RouteCache {
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            max_entries: max_entries.max(1),
            ttl,
        }
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(config.cache_max_entries, config.cache_ttl())
    }

    // A panic mid-update leaves at worst a missing entry, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, query: &RouteQuery) -> Option<RouteResult> {
        let key = query.cache_key();
        let mut state = self.lock();

        let expired = match state.entries.get(&key) {
            Some(cached) => self
                .ttl
                .is_some_and(|ttl| cached.stored_at.elapsed() >= ttl),
            None => return None,
        };

        if expired {
            state.remove(&key);
            return None;
        }

        state.entries.get(&key).map(|cached| cached.route.clone())
    }

    /// Stores `route`, replacing any previous entry for the same query.
    pub fn set(&self, query: &RouteQuery, route: RouteResult) {
        let key = query.cache_key();
        let mut state = self.lock();

        state.remove(&key);
        while state.entries.len() >= self.max_entries {
            match state.order.pop_front() {
                Some(oldest) => {
                    state.entries.remove(&oldest);
                }
                None => break,
            }
        }

        state.order.push_back(key.clone());
        state.entries.insert(
            key,
            CachedRoute {
                route,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
