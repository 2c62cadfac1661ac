//! Request logging middleware
//!
//! One line when a request starts and one when it completes, keyed by the
//! `x-request-id` header. Only 5xx completions are logged at warn.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    http::StatusCode,
    response::Response,
};
use std::time::Instant;
use tracing::{Level, info, warn};

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        user_agent = %user_agent,
        "Request started"
    );

    let response = next.run(req).await;

    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    if completion_level(response.status()) == Level::WARN {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Request completed with server error"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Request completed"
        );
    }

    response
}

/// Warn for 5xx, info for everything else
fn completion_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}
