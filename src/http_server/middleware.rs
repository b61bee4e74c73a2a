//! Request logging middleware
//!
//! Emits one `REQUEST_COMPLETED` line per request with method, path,
//! status and elapsed time.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::observability::{log_event_with_fields, Event};

/// Logs each request after the inner service has produced a response.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    let elapsed_ms = started.elapsed().as_millis().to_string();
    log_event_with_fields(
        Event::RequestCompleted,
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("status", status.as_str()),
            ("elapsed_ms", elapsed_ms.as_str()),
        ],
    );

    response
}
