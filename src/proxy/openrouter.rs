//! OpenRouter provider
//!
//! Forwards OpenAI-compatible chat completion requests to OpenRouter.

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use crate::config::Config;
use crate::error::{RelayError, RelayResult};
use crate::proxy::headers::build_default_headers;
use crate::proxy::provider::{ChatProvider, UpstreamResponse};
use crate::relay::OutboundPayload;

/// OpenRouter chat completion client
pub struct OpenRouterProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    referer: String,
    title: String,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.openrouter_api_url.clone(),
            api_key: config.openrouter_api_key.clone(),
            referer: config.app_referer.clone(),
            title: config.app_title.clone(),
        }
    }

    /// Full URL of the chat completion endpoint
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(skip(self, payload), fields(model = %payload.model))]
    async fn chat_completions(&self, payload: &OutboundPayload) -> RelayResult<UpstreamResponse> {
        let api_key = self.api_key.as_deref().ok_or(RelayError::MissingCredential)?;
        let url = self.chat_completions_url();
        let headers = build_default_headers(api_key, &self.referer, &self.title)?;

        debug!(url = %url, messages = payload.messages.as_array().map_or(0, Vec::len), "Sending request to OpenRouter");

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Failed to send request to OpenRouter");
                e
            })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text().await?;

        debug!(
            url = %url,
            status = %status.as_u16(),
            body_len = body.len(),
            "Received response from OpenRouter"
        );

        Ok(UpstreamResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}
