//! Error types for the relay
//!
//! Every failure the relay can report maps to one variant here, and each
//! variant renders to the exact JSON body clients rely on.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::relay::cors;

/// Maximum number of characters of an upstream error body echoed back
pub const UPSTREAM_BODY_LIMIT: usize = 2000;

/// Relay-level errors
///
/// All variants are terminal for the invocation; nothing is retried.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Unsupported provider: {provider}")]
    UnsupportedProvider { provider: String },

    #[error("Missing OPENROUTER_API_KEY")]
    MissingCredential,

    #[error("Missing prompt/messages in request body")]
    MissingMessage,

    #[error("AI upstream error {status} {status_text}")]
    Upstream {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Catch-all for anything unexpected (bad JSON, network failure)
    #[error("{0}")]
    Function(String),
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Function(format!("Invalid JSON in request body: {}", err))
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Function(format!("Upstream request failed: {}", err))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
    #[serde(rename = "upstream_statusText", skip_serializing_if = "Option::is_none")]
    pub upstream_status_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    fn new(error: &'static str) -> Self {
        Self {
            ok: false,
            error,
            provider: None,
            upstream_status: None,
            upstream_status_text: None,
            upstream_body: None,
            details: None,
        }
    }
}

/// Keep at most `limit` characters of `text`
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

impl RelayError {
    /// Upstream failure with its body cut to [`UPSTREAM_BODY_LIMIT`] characters
    pub fn upstream(status: u16, status_text: impl Into<String>, body: &str) -> Self {
        RelayError::Upstream {
            status,
            status_text: status_text.into(),
            body: truncate_chars(body, UPSTREAM_BODY_LIMIT).to_string(),
        }
    }

    /// Stable kind name used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::UnsupportedProvider { .. } => "unsupported_provider",
            RelayError::MissingCredential => "missing_credential",
            RelayError::MissingMessage => "missing_message",
            RelayError::Upstream { .. } => "upstream_error",
            RelayError::Function(_) => "function_error",
        }
    }

    /// HTTP status returned to the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::UnsupportedProvider { .. } | RelayError::MissingMessage => {
                StatusCode::BAD_REQUEST
            }
            RelayError::MissingCredential | RelayError::Function(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let with_cors = !matches!(self, RelayError::Function(_));

        let body = match self {
            RelayError::UnsupportedProvider { provider } => ErrorResponse {
                provider: Some(provider),
                ..ErrorResponse::new("Unsupported provider")
            },
            RelayError::MissingCredential => ErrorResponse::new("Missing OPENROUTER_API_KEY"),
            RelayError::MissingMessage => {
                ErrorResponse::new("Missing prompt/messages in request body")
            }
            RelayError::Upstream {
                status,
                status_text,
                body,
            } => ErrorResponse {
                upstream_status: Some(status),
                upstream_status_text: Some(status_text),
                upstream_body: Some(body),
                ..ErrorResponse::new("AI upstream error")
            },
            RelayError::Function(details) => ErrorResponse {
                details: Some(details),
                ..ErrorResponse::new("Function error")
            },
        };

        let mut response = (status, Json(body)).into_response();
        if with_cors {
            cors::apply(response.headers_mut());
        }
        response
    }
}

/// Result type alias for convenience
pub type RelayResult<T> = Result<T, RelayError>;
