//! Proxy module
//!
//! Handles request forwarding to the upstream AI provider.

pub mod headers;
pub mod logging;
pub mod openrouter;
pub mod provider;

pub use logging::RequestContext;
pub use openrouter::OpenRouterProvider;
pub use provider::{ChatProvider, UpstreamResponse};
