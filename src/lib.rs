//! AI Relay - CORS-enabled chat completion relay
//!
//! This library provides the core functionality for the relay server.
//! It accepts loosely shaped chat requests from browser clients, forwards
//! them to OpenRouter, and passes the upstream response back unchanged.

pub mod config;
pub mod error;
pub mod proxy;
pub mod relay;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::error::{RelayError, RelayResult};
pub use crate::proxy::{ChatProvider, OpenRouterProvider};
pub use crate::relay::RelayHandler;

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Upstream provider the relay forwards to
    pub upstream: Arc<dyn ChatProvider>,
    /// Relay handler bound to `upstream`
    pub relay: RelayHandler,
}

impl AppState {
    /// Create a new application state backed by OpenRouter
    pub fn new(config: Config) -> Result<Self> {
        // No request timeout: the upstream call is bounded only by the
        // platform and the connection's own behaviour.
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .build()?;

        let upstream: Arc<dyn ChatProvider> =
            Arc::new(OpenRouterProvider::new(http_client, &config));

        Ok(Self::with_provider(config, upstream))
    }

    /// Create application state around an arbitrary provider
    pub fn with_provider(config: Config, upstream: Arc<dyn ChatProvider>) -> Self {
        let relay = RelayHandler::new(&config, upstream.clone());

        Self {
            config,
            start_time: Instant::now(),
            upstream,
            relay,
        }
    }
}
