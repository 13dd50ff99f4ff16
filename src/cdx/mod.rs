//! CDX Module
//!
//! Query construction and HTTP client for the Wayback Machine's
//! capture-index (CDX) search API.

mod client;
mod query;

pub use client::{CdxClient, CdxConfig};
pub use query::CdxQuery;

/// Raw CDX response shape: rows of strings, header row first.
pub type SnapshotRows = Vec<Vec<String>>;
