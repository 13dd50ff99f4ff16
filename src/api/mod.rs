//! API Module
//!
//! HTTP handlers and routing for the proxy REST API.
//!
//! # Endpoints
//! - `GET /api/wayback` - Cached CDX snapshot lookup
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
