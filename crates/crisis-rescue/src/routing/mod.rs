//! Driving-route lookups against the external routing backend.
//!
//! [`RoutingService`] fronts a [`RouteProvider`] with an optional bounded [`RouteCache`] and
//! turns every provider failure into the fixed fallback route, tagging the answer with its
//! [`RouteSource`] so callers can tell a live route from a substitute.

pub mod cache;
pub mod domain;
pub mod provider;
pub mod service;

pub use cache::RouteCache;
pub use domain::{RouteGeometry, RouteLookup, RouteResult, RouteSource};
pub use provider::{OsrmClient, RouteProvider, RouteProviderError};
pub use service::RoutingService;
