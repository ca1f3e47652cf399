//! Health check endpoints
//!
//! - `/health` - Health summary including upstream configuration
//! - `/health/live` - Liveness probe

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub timestamp: String,
    pub provider: String,
    pub upstream_configured: bool,
}

/// Simple health response for liveness
#[derive(Debug, Serialize)]
pub struct SimpleHealthResponse {
    pub status: &'static str,
}

/// Health summary.
///
/// A missing API key reports `degraded` rather than failing: the relay still
/// answers every request, just with a 500 body.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let upstream_configured = state.upstream.is_configured();

    Json(HealthResponse {
        status: if upstream_configured { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        provider: state.config.provider.clone(),
        upstream_configured,
    })
}

/// Liveness probe
pub async fn liveness_check() -> Json<SimpleHealthResponse> {
    Json(SimpleHealthResponse { status: "healthy" })
}
