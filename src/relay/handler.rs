//! Relay handler
//!
//! One linear pass per invocation: preflight, parse, provider check,
//! credential check, message derivation, a single upstream call, and
//! response mapping. Nothing is shared between invocations except the
//! read-only configuration and the upstream client.

use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, Instrument};

use crate::config::Config;
use crate::error::{RelayError, RelayResult};
use crate::proxy::{ChatProvider, RequestContext};
use crate::relay::cors;
use crate::relay::request::{first_message_has_content, IncomingRequest, OutboundPayload};

/// Forwards chat requests to the configured upstream provider
pub struct RelayHandler {
    provider: String,
    model: String,
    upstream: Arc<dyn ChatProvider>,
}

impl RelayHandler {
    /// Create a handler from configuration and an upstream provider
    pub fn new(config: &Config, upstream: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider: config.provider.clone(),
            model: config.model.clone(),
            upstream,
        }
    }

    /// Handle one invocation. Always yields a well-formed response.
    pub async fn handle(&self, method: &Method, body: &[u8]) -> Response {
        if *method == Method::OPTIONS {
            return preflight();
        }

        let ctx = RequestContext::new(method.as_str(), &self.provider);
        let span = ctx.create_span();

        match self.relay(&ctx, body).instrument(span).await {
            Ok(response) => response,
            Err(err) => {
                if let RelayError::Function(details) = &err {
                    ctx.log_function_crash(details);
                }
                debug!(
                    trace_id = %ctx.trace_id,
                    error_kind = err.kind(),
                    status = %err.status_code(),
                    "Relay request failed"
                );
                err.into_response()
            }
        }
    }

    async fn relay(&self, ctx: &RequestContext, body: &[u8]) -> RelayResult<Response> {
        let incoming = IncomingRequest::parse(body)?;

        if self.provider != self.upstream.name() {
            ctx.log_unsupported_provider();
            return Err(RelayError::UnsupportedProvider {
                provider: self.provider.clone(),
            });
        }

        if !self.upstream.is_configured() {
            ctx.log_missing_env(false);
            return Err(RelayError::MissingCredential);
        }

        let messages = incoming.derive_messages()?;
        if !first_message_has_content(&messages) {
            return Err(RelayError::MissingMessage);
        }

        let payload = OutboundPayload {
            model: self.model.clone(),
            messages,
            temperature: incoming.temperature(),
        };

        let ctx = ctx.clone().with_model(payload.model.as_str());
        ctx.log_request_start(payload.messages.as_array().map_or(0, Vec::len));

        let upstream = self.upstream.chat_completions(&payload).await?;
        ctx.log_upstream_response(upstream.status, upstream.body.len());

        if !upstream.is_success() {
            let err = RelayError::upstream(upstream.status, upstream.status_text, &upstream.body);
            if let RelayError::Upstream {
                status,
                status_text,
                body,
            } = &err
            {
                ctx.log_upstream_error(*status, status_text, body);
            }
            return Err(err);
        }

        ctx.log_request_complete(StatusCode::OK.as_u16());
        Ok(pass_through(upstream.body))
    }
}

/// 204 answer to a CORS preflight
fn preflight() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    cors::apply(response.headers_mut());
    response
}

/// 200 carrying the upstream body exactly as received
fn pass_through(body: String) -> Response {
    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response();
    cors::apply(response.headers_mut());
    response
}
