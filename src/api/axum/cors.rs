//! CORS for dashboards served from another origin.
//!
//! The session cookie travels with cross-origin requests only when
//! credentials are allowed, so every layer here allows them.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// CORS layer for the given dashboard origins.
///
/// Unparseable origins are skipped with a warning.
pub fn dashboard<O: AsRef<str>>(allowed_origins: &[O]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.as_ref().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!(
                    target: "dashgate",
                    "msg=\"ignoring invalid cors origin\" origin=\"{}\"",
                    origin.as_ref()
                );
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
