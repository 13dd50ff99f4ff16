//! CDX Query Module
//!
//! Builds the canonical upstream query for a lookup request. The serialized
//! query doubles as the cache key, so parameter ordering must be stable.

use reqwest::Url;

use crate::models::LookupRequest;

// == Query Constants ==
/// Output format requested from the CDX API.
pub const OUTPUT_FORMAT: &str = "json";

/// Fields requested for each capture row.
pub const FIELD_SELECTION: &str = "timestamp,original,statuscode,mimetype,length";

/// Maximum number of capture rows requested per query.
pub const RESULT_LIMIT: u32 = 1000;

// == CDX Query ==
/// A fully-resolved CDX search query.
///
/// Two lookup requests that normalize to the same upstream query always
/// serialize identically here, regardless of how the caller ordered its
/// query-string parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdxQuery {
    /// Target URL, already trimmed by validation
    url: String,
    /// Optional lower year bound (YYYY)
    from: Option<String>,
    /// Optional upper year bound (YYYY)
    to: Option<String>,
}

impl From<LookupRequest> for CdxQuery {
    fn from(request: LookupRequest) -> Self {
        Self {
            url: request.url,
            from: request.from,
            to: request.to,
        }
    }
}

impl CdxQuery {
    // == Query Pairs ==
    /// Returns the query parameters in their fixed serialization order.
    ///
    /// Year bounds are included only when supplied.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("url", self.url.clone()),
            ("output", OUTPUT_FORMAT.to_string()),
            ("fl", FIELD_SELECTION.to_string()),
        ];

        if let Some(from) = &self.from {
            pairs.push(("from", from.clone()));
        }
        if let Some(to) = &self.to {
            pairs.push(("to", to.clone()));
        }

        pairs.push(("limit", RESULT_LIMIT.to_string()));
        pairs
    }

    // == To URL ==
    /// Builds the full upstream request URL against a CDX base endpoint.
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut().extend_pairs(self.query_pairs());
        url
    }

    // == Cache Key ==
    /// Derives the cache key: the full upstream URL string.
    ///
    /// Using the exact URL the fetch will issue guarantees that identical
    /// normalized queries share a cache line and distinct ones never collide.
    pub fn cache_key(&self, base: &Url) -> String {
        self.to_url(base).into()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://web.archive.org/cdx/search/cdx").unwrap()
    }

    fn request(url: &str, from: Option<&str>, to: Option<&str>) -> LookupRequest {
        LookupRequest {
            url: url.to_string(),
            from: from.map(String::from),
            to: to.map(String::from),
        }
    }

    #[test]
    fn test_query_pairs_fixed_order() {
        let query = CdxQuery::from(request("example.com", Some("2020"), Some("2021")));
        let keys: Vec<&str> = query.query_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["url", "output", "fl", "from", "to", "limit"]);
    }

    #[test]
    fn test_query_pairs_omit_absent_years() {
        let query = CdxQuery::from(request("example.com", None, None));
        let keys: Vec<&str> = query.query_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["url", "output", "fl", "limit"]);
    }

    #[test]
    fn test_cache_key_includes_fixed_parameters() {
        let key = CdxQuery::from(request("example.com", None, None)).cache_key(&base());
        assert!(key.starts_with("https://web.archive.org/cdx/search/cdx?"));
        assert!(key.contains("url=example.com"));
        assert!(key.contains("output=json"));
        assert!(key.contains("fl=timestamp%2Coriginal%2Cstatuscode%2Cmimetype%2Clength"));
        assert!(key.contains("limit=1000"));
    }

    #[test]
    fn test_cache_key_deterministic_for_equal_requests() {
        let first = CdxQuery::from(request("example.com", Some("2020"), Some("2021")));
        let second = CdxQuery::from(request("example.com", Some("2020"), Some("2021")));
        assert_eq!(first.cache_key(&base()), second.cache_key(&base()));
    }

    #[test]
    fn test_cache_key_distinct_for_distinct_requests() {
        let plain = CdxQuery::from(request("example.com", None, None));
        let bounded = CdxQuery::from(request("example.com", Some("2020"), None));
        let other = CdxQuery::from(request("example.org", None, None));

        assert_ne!(plain.cache_key(&base()), bounded.cache_key(&base()));
        assert_ne!(plain.cache_key(&base()), other.cache_key(&base()));
    }
}
