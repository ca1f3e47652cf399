//! Request logging utilities for relay invocations
//!
//! Provides structured logging with a short correlation ID so every event of
//! one invocation can be grouped. The API key is never part of any event.

use std::time::Instant;
use tracing::{error, info, Span};
use uuid::Uuid;

/// Context for tracking one relay invocation
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this invocation (for log correlation)
    pub trace_id: String,
    /// When the invocation started
    pub start_time: Instant,
    /// HTTP method of the inbound request
    pub method: String,
    /// Provider handling this request
    pub provider: String,
    /// Model being used (set once the upstream call is prepared)
    pub model: Option<String>,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(method: &str, provider: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            method: method.to_string(),
            provider: provider.to_string(),
            model: None,
        }
    }

    /// Set the model for this request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    pub fn log_request_start(&self, message_count: usize) {
        info!(
            trace_id = %self.trace_id,
            method = %self.method,
            provider = %self.provider,
            model = ?self.model,
            messages = %message_count,
            "Relaying chat request"
        );
    }

    pub fn log_upstream_response(&self, status: u16, body_len: usize) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            status = %status,
            body_len = %body_len,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from upstream"
        );
    }

    pub fn log_unsupported_provider(&self) {
        error!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            "UNSUPPORTED_PROVIDER"
        );
    }

    /// Log a missing credential; only whether a key exists is recorded
    pub fn log_missing_env(&self, has_openrouter_key: bool) {
        error!(
            trace_id = %self.trace_id,
            has_openrouter_key = %has_openrouter_key,
            "MISSING_ENV"
        );
    }

    pub fn log_upstream_error(&self, status: u16, status_text: &str, body: &str) {
        error!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = ?self.model,
            upstream_status = %status,
            upstream_status_text = %status_text,
            upstream_body = %body,
            elapsed_ms = %self.elapsed_ms(),
            "UPSTREAM_ERROR"
        );
    }

    pub fn log_function_crash(&self, error: &str) {
        error!(
            trace_id = %self.trace_id,
            method = %self.method,
            provider = %self.provider,
            elapsed_ms = %self.elapsed_ms(),
            error = %error,
            "FUNCTION_CRASH"
        );
    }

    pub fn log_request_complete(&self, status: u16) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = ?self.model,
            status = %status,
            elapsed_ms = %self.elapsed_ms(),
            "Relay request completed"
        );
    }

    /// Create a tracing span for this request
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "relay_request",
            trace_id = %self.trace_id,
            method = %self.method,
            provider = %self.provider,
        )
    }
}
