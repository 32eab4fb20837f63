//! Crisis-response coordination backend.
//!
//! Proxies driving-route lookups to an external routing backend, keeps an
//! append-only log of rescue requests, and tracks the small fleet and partner
//! directories the dispatch dashboard reads from.

pub mod api;
pub mod config;
pub mod error;
pub mod expiry;
pub mod geo;
pub mod priority;
pub mod registry;
pub mod requests;
pub mod routing;
pub mod telemetry;
pub mod units;
