//! CDX Client Module
//!
//! HTTP client for the Wayback Machine's CDX search endpoint.

use std::time::Duration;

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cdx::{CdxQuery, SnapshotRows};
use crate::config::{Config, DEFAULT_CDX_BASE_URL};
use crate::error::{ProxyError, Result};

/// Default timeout for upstream requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// User-agent identifying this client to the archive.
const USER_AGENT: &str = concat!("wayback-proxy/", env!("CARGO_PKG_VERSION"));

// == CDX Config ==
/// CDX client configuration.
#[derive(Debug, Clone)]
pub struct CdxConfig {
    /// Base URL of the CDX search endpoint
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for CdxConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CDX_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl From<&Config> for CdxConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.cdx_base_url.clone(),
            timeout: Duration::from_secs(config.upstream_timeout_secs),
        }
    }
}

// == CDX Client ==
/// Client for the CDX search API.
#[derive(Debug, Clone)]
pub struct CdxClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CdxClient {
    // == Constructor ==
    /// Creates a new client with the given configuration.
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be
    /// built.
    pub fn new(config: CdxConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ProxyError::Transport(format!("invalid CDX base URL '{}': {}", config.base_url, e))
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    // == Base URL ==
    /// Returns the configured CDX base endpoint.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // == Fetch ==
    /// Issues the CDX search for a query and parses the response rows.
    ///
    /// Non-success upstream statuses are surfaced verbatim; network and
    /// timeout failures map to a transport error.
    pub async fn fetch(&self, query: &CdxQuery) -> Result<SnapshotRows> {
        let url = query.to_url(&self.base_url);
        debug!(url = %url, "fetching from CDX API");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::Upstream(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        parse_rows(body)
    }
}

// == Row Parsing ==
/// Parses a CDX JSON body into snapshot rows.
///
/// The body must be a JSON array; the header row is kept as element 0.
/// Rows that are not arrays of strings are dropped with a warning rather
/// than failing the whole response.
fn parse_rows(body: Value) -> Result<SnapshotRows> {
    let Value::Array(raw_rows) = body else {
        return Err(ProxyError::MalformedUpstream(
            "expected a JSON array from the CDX API".to_string(),
        ));
    };

    let mut rows = Vec::with_capacity(raw_rows.len());
    for raw in raw_rows {
        match serde_json::from_value::<Vec<String>>(raw) {
            Ok(row) => rows.push(row),
            Err(e) => warn!(error = %e, "dropping malformed CDX row"),
        }
    }

    Ok(rows)
}
