//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::cache::SnapshotCache;
use crate::cdx::{CdxClient, CdxConfig, CdxQuery, SnapshotRows};
use crate::config::Config;
use crate::error::Result;
use crate::models::{HealthResponse, LookupQuery, StatsResponse};

/// Response header carrying the cache disposition.
pub const X_CACHE_HEADER: &str = "x-cache";

// == Cache Status ==
/// Cache disposition of a lookup, reported via the `X-Cache` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from the cache
    Hit,
    /// Fetched from upstream
    Miss,
}

impl CacheStatus {
    /// Header value for this disposition.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

// == App State ==
/// Application state shared across all handlers.
///
/// The cache is constructed and injected by the caller; nothing here lives
/// in a module-level global.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe snapshot cache
    pub cache: Arc<RwLock<SnapshotCache>>,
    /// Upstream CDX client
    pub cdx: CdxClient,
}

impl AppState {
    /// Creates a new AppState from a cache and client.
    pub fn new(cache: SnapshotCache, cdx: CdxClient) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            cdx,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = SnapshotCache::new(config.max_entries, config.ttl_secs);
        let cdx = CdxClient::new(CdxConfig::from(config))?;
        Ok(Self::new(cache, cdx))
    }
}

/// Handler for GET /api/wayback
///
/// Validates the lookup, serves a fresh cached response when one exists, and
/// otherwise fetches from the CDX API and stores the result. The response is
/// the raw CDX row shape, header row included, tagged with `X-Cache`.
pub async fn wayback_handler(
    State(state): State<AppState>,
    Query(params): Query<LookupQuery>,
) -> Result<Response> {
    let request = params.validate()?;
    let query = CdxQuery::from(request);
    let cache_key = query.cache_key(state.cdx.base_url());

    {
        let mut cache = state.cache.write().await;
        cache.purge_expired();
        if let Some(rows) = cache.get(&cache_key) {
            info!(key = %cache_key, "cache hit");
            return Ok(tagged_response(CacheStatus::Hit, rows));
        }
    }

    // The lock is not held across the upstream await: concurrent identical
    // misses may each fetch once, and the last write wins.
    info!(key = %cache_key, "cache miss, fetching from CDX API");
    let rows = state.cdx.fetch(&query).await?;

    let mut cache = state.cache.write().await;
    cache.insert(cache_key, rows.clone());

    Ok(tagged_response(CacheStatus::Miss, rows))
}

/// Builds a snapshot response tagged with its cache disposition.
fn tagged_response(status: CacheStatus, rows: SnapshotRows) -> Response {
    ([(X_CACHE_HEADER, status.as_str())], Json(rows)).into_response()
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from_stats(&cache.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
