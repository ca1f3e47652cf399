//! Relay endpoint
//!
//! Every HTTP method reaches the relay handler; only `OPTIONS` is special-cased
//! (as a CORS preflight) inside the handler itself.

use std::sync::Arc;

use axum::{extract::State, http::Method, response::Response};
use bytes::Bytes;
use tracing::debug;

use crate::{routes::metrics::record_request, AppState};

/// Relay a chat request to the upstream provider
pub async fn relay(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Response {
    let start_time = std::time::Instant::now();
    debug!(method = %method, body_len = body.len(), "Relay invocation");

    let response = state.relay.handle(&method, &body).await;

    record_request(
        response.status().as_u16(),
        start_time.elapsed().as_secs_f64(),
    );
    response
}
