//! Access logging middleware.
//!
//! Logs method, path, status, latency and whether the caller passed the
//! admin gate. Runs outermost so rejected requests are logged too.

use std::time::Instant;

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::api::types::AdminContext;

pub async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let admin = response.extensions().get::<AdminContext>().is_some();
    tracing::info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        admin,
        "API access"
    );

    response
}
