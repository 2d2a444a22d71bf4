//! Request logger: side effect only, always forwards.
//!
//! Runs unconditionally before routing, so every request is recorded whether
//! or not a route matches. Never inspects the response.

use std::time::{SystemTime, UNIX_EPOCH};

use http::Method;
use tracing::info;

pub fn log_request(method: &Method, path: &str) {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    info!(%method, path, timestamp_ms, "request");
}
