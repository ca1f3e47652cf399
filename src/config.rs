//! Configuration management for the relay
//!
//! Configuration is loaded from environment variables once at startup and
//! handed to the relay handler as a read-only value.

use anyhow::{Context, Result};
use std::env;

/// The only upstream provider the relay knows how to talk to
pub const PROVIDER_OPENROUTER: &str = "openrouter";

const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
const DEFAULT_OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_APP_REFERER: &str = "https://super-sfogliatella-edee76.netlify.app";
const DEFAULT_APP_TITLE: &str = "Royal Ray Zone";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Selected AI provider, lower-cased
    pub provider: String,
    /// Model identifier sent upstream
    pub model: String,
    /// Fallback model identifier (not consulted yet)
    pub fallback_model: String,

    /// OpenRouter API base URL
    pub openrouter_api_url: String,
    /// OpenRouter API key (checked per request, not at startup)
    pub openrouter_api_key: Option<String>,

    /// Value of the `HTTP-Referer` header identifying the calling app
    pub app_referer: String,
    /// Value of the `X-Title` header identifying the calling app
    pub app_title: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset, so `AI_PROVIDER=` still selects OpenRouter.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            host: var_or("RELAY_HOST", "0.0.0.0"),
            port: var_or("RELAY_PORT", "8080")
                .parse()
                .context("Invalid RELAY_PORT")?,

            provider: var_or("AI_PROVIDER", PROVIDER_OPENROUTER).to_lowercase(),
            model: var_or("MODEL_TEXT", DEFAULT_MODEL),
            fallback_model: var_or("MODEL_TEXT_FALLBACK", DEFAULT_MODEL),

            openrouter_api_url: var_or("OPENROUTER_API_URL", DEFAULT_OPENROUTER_API_URL)
                .trim_end_matches('/')
                .to_string(),
            openrouter_api_key: var("OPENROUTER_API_KEY"),

            app_referer: var_or("OPENROUTER_HTTP_REFERER", DEFAULT_APP_REFERER),
            app_title: var_or("OPENROUTER_APP_TITLE", DEFAULT_APP_TITLE),
        })
    }
}
