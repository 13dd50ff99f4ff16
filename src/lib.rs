//! Wayback Proxy - A caching proxy for the Wayback Machine CDX API
//!
//! Fronts the Internet Archive's capture-index search with a TTL- and
//! capacity-bounded in-memory cache.

pub mod api;
pub mod cache;
pub mod cdx;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use config::Config;
