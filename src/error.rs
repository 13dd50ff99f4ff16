//! Error types for the proxy server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Proxy Error Enum ==
/// Unified error type for the proxy server.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Invalid request data (caller error, never retried)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream archive API returned a non-success status
    #[error("Wayback Machine API error: {0}")]
    Upstream(u16),

    /// Network, timeout, or other failure reaching upstream
    #[error("Transport error: {0}")]
    Transport(String),

    /// Upstream response body did not have the expected CDX shape
    #[error("Malformed upstream response: {0}")]
    MalformedUpstream(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ProxyError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ProxyError::Upstream(code) => (
                // Propagate the upstream status verbatim; anything outside
                // the representable range becomes a 502.
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY),
                format!("Wayback Machine API error: {}", code),
            ),
            ProxyError::Transport(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch from Wayback Machine".to_string(),
            ),
            ProxyError::MalformedUpstream(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = Json(ErrorResponse::new(message));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy server.
pub type Result<T> = std::result::Result<T, ProxyError>;
