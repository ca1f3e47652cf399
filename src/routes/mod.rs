//! HTTP routes for the relay
//!
//! This module defines all HTTP endpoints exposed by the service.

pub mod health;
pub mod metrics;
pub mod relay;

use std::sync::Arc;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Path of the relay endpoint
pub const RELAY_PATH: &str = "/ai";
/// Alias kept for clients built against the Netlify function URL
pub const NETLIFY_RELAY_PATH: &str = "/.netlify/functions/ai";

/// Create the main application router
///
/// CORS is answered by the relay handler itself rather than a `CorsLayer`,
/// because the crash fallback must go out without CORS headers.
pub fn create_router(state: Arc<AppState>) -> Router {
    let relay_routes = Router::new()
        .route(RELAY_PATH, any(relay::relay))
        .route(NETLIFY_RELAY_PATH, any(relay::relay));

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .merge(public_routes)
        .merge(relay_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
