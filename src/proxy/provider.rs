//! AI provider abstraction layer
//!
//! Defines the trait interface for the upstream chat-completion provider so
//! the relay handler can be exercised without a network.

use async_trait::async_trait;

use crate::error::RelayResult;
use crate::relay::OutboundPayload;

/// Raw upstream reply, kept opaque so successful bodies pass through byte for byte
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl UpstreamResponse {
    /// Whether the upstream status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait defining the interface for AI providers
///
/// # Security
///
/// Implementations MUST:
/// - Never forward client Authorization headers to the provider
/// - Use the provider API key from configuration
/// - Never log the API key
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get the provider name for logging and metrics
    fn name(&self) -> &'static str;

    /// Check if the provider has a credential to call upstream with
    fn is_configured(&self) -> bool;

    /// Send one chat completion request.
    ///
    /// Non-2xx statuses are returned as data, not as errors; only transport
    /// failures surface as `Err`.
    async fn chat_completions(&self, payload: &OutboundPayload) -> RelayResult<UpstreamResponse>;
}
