//! Header utilities for upstream requests
//!
//! Client headers are never forwarded; the relay builds the upstream header
//! set from configuration alone.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::{RelayError, RelayResult};

/// OpenRouter attribution header carrying the calling site URL
pub const HTTP_REFERER: HeaderName = HeaderName::from_static("http-referer");
/// OpenRouter attribution header carrying the calling app name
pub const X_TITLE: HeaderName = HeaderName::from_static("x-title");

/// Build the headers sent with every OpenRouter request
pub fn build_default_headers(api_key: &str, referer: &str, title: &str) -> RelayResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", api_key), "API key")?);
    headers.insert(HTTP_REFERER, header_value(referer, "HTTP-Referer")?);
    headers.insert(X_TITLE, header_value(title, "X-Title")?);

    Ok(headers)
}

fn header_value(value: &str, what: &str) -> RelayResult<HeaderValue> {
    // Never echo the value itself: it may be the API key.
    HeaderValue::from_str(value)
        .map_err(|_| RelayError::Function(format!("Invalid {} header value", what)))
}
