//! Axum middleware layers applied to the router.
//!
//! Includes request tracing, timeout enforcement, response compression and
//! the single-origin CORS policy.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// CORS policy: exactly one allowed origin with a fixed method and header set.
pub fn cors(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
