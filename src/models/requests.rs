//! Request DTOs for the proxy API
//!
//! Defines the lookup query parameters and their validation.

use serde::Deserialize;

use crate::error::{ProxyError, Result};

/// Maximum accepted length of the target URL, in characters.
pub const MAX_URL_LENGTH: usize = 2000;

// == Lookup Query ==
/// Raw query parameters of GET /api/wayback.
///
/// # Fields
/// - `url`: The target URL to look up in the archive
/// - `from`: Optional start year (YYYY)
/// - `to`: Optional end year (YYYY)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupQuery {
    /// The target URL
    pub url: Option<String>,
    /// Optional start year
    pub from: Option<String>,
    /// Optional end year
    pub to: Option<String>,
}

// == Lookup Request ==
/// A validated lookup: trimmed target URL plus well-formed year bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Trimmed, non-empty target URL
    pub url: String,
    /// Lower year bound (exactly four digits)
    pub from: Option<String>,
    /// Upper year bound (exactly four digits)
    pub to: Option<String>,
}

impl LookupQuery {
    /// Validates the query parameters.
    ///
    /// Runs before any cache or upstream access. Empty year parameters are
    /// treated as absent, matching the behavior of an omitted parameter.
    pub fn validate(&self) -> Result<LookupRequest> {
        let url = self.url.as_deref().unwrap_or("").trim();
        if url.is_empty() {
            return Err(ProxyError::InvalidRequest(
                "URL parameter is required".to_string(),
            ));
        }
        if url.chars().count() > MAX_URL_LENGTH {
            return Err(ProxyError::InvalidRequest("URL too long".to_string()));
        }

        let from = normalized_year(&self.from);
        if let Some(from) = &from {
            if !is_four_digit_year(from) {
                return Err(ProxyError::InvalidRequest("from must be YYYY".to_string()));
            }
        }

        let to = normalized_year(&self.to);
        if let Some(to) = &to {
            if !is_four_digit_year(to) {
                return Err(ProxyError::InvalidRequest("to must be YYYY".to_string()));
            }
        }

        Ok(LookupRequest {
            url: url.to_string(),
            from,
            to,
        })
    }
}

/// Trims a year parameter and drops it entirely when blank.
fn normalized_year(year: &Option<String>) -> Option<String> {
    year.as_deref()
        .map(str::trim)
        .filter(|y| !y.is_empty())
        .map(String::from)
}

/// Checks for exactly four ASCII digits.
fn is_four_digit_year(year: &str) -> bool {
    year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit())
}
