//! Logging middleware for request/response tracing.
//!
//! Logs incoming requests and outgoing responses with timing information
//! and correlation via request IDs.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Level, info, span};

use super::RequestId;

/// Middleware that logs request and response information.
///
/// Logs method, path, and request ID on the way in; status and duration
/// on the way out, inside a span keyed by the request ID.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    // The span guard must not be held across the await below, so each log
    // statement enters the span on its own.
    let span = span!(
        Level::INFO,
        "http_request",
        method = %method,
        uri = %uri,
        request_id = %request_id
    );

    span.in_scope(|| {
        info!(
            method = %method,
            path = %uri.path(),
            request_id = %request_id,
            "Request received"
        );
    });

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    span.in_scope(|| {
        info!(
            status = %response.status().as_u16(),
            duration_ms = %duration.as_millis(),
            request_id = %request_id,
            "Response sent"
        );
    });

    response
}
