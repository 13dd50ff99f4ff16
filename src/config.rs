//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Default CDX search endpoint of the Wayback Machine.
pub const DEFAULT_CDX_BASE_URL: &str = "https://web.archive.org/cdx/search/cdx";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Cache entry time-to-live in seconds
    pub ttl_secs: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the upstream CDX endpoint
    pub cdx_base_url: String,
    /// Timeout for outbound CDX requests in seconds
    pub upstream_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 500)
    /// - `CACHE_TTL_SECS` - Entry TTL in seconds (default: 86400, i.e. 24 hours)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CDX_BASE_URL` - Upstream CDX endpoint (default: web.archive.org)
    /// - `UPSTREAM_TIMEOUT_SECS` - Outbound request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86400),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cdx_base_url: env::var("CDX_BASE_URL")
                .ok()
                .unwrap_or_else(|| DEFAULT_CDX_BASE_URL.to_string()),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 500,
            ttl_secs: 86400,
            server_port: 3000,
            cdx_base_url: DEFAULT_CDX_BASE_URL.to_string(),
            upstream_timeout_secs: 10,
        }
    }
}
