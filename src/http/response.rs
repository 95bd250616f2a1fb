//! Response helpers for the routing fallbacks.
//!
//! # Responsibilities
//! - Write the 404 / 405 terminal responses
//! - Advertise the methods a path does support via `Allow`
//!
//! # Design Decisions
//! - Body is the canonical reason phrase ("Not Found")
//! - Plain text; applications wanting HTML or JSON install a custom handler

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};

/// A bare status response whose body is the reason phrase.
pub fn status_response(status: StatusCode) -> Response {
    let reason = status.canonical_reason().unwrap_or("");
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
        reason.to_string(),
    )
        .into_response()
}

/// 404 Not Found.
pub fn not_found() -> Response {
    status_response(StatusCode::NOT_FOUND)
}

/// 405 Method Not Allowed, listing `allowed` in the `Allow` header.
pub fn method_not_allowed(allowed: &[Method]) -> Response {
    let mut response = status_response(StatusCode::METHOD_NOT_ALLOWED);
    let list = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if let Ok(value) = HeaderValue::from_str(&list) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}
