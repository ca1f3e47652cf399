//! Inbound request shape and message derivation
//!
//! The inbound body is untrusted. Every recognised field is optional, and
//! presence follows JavaScript truthiness: `""`, `0`, `false` and `null`
//! count as absent. A caller-supplied `messages` value is never reshaped; it
//! goes upstream exactly as received.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RelayError, RelayResult};

/// Temperature forwarded when the caller does not supply one
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Recognised fields of an inbound relay request. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingRequest {
    pub messages: Option<Value>,
    pub prompt: Option<Value>,
    pub text: Option<Value>,
    pub input: Option<Value>,
    pub temperature: Option<Value>,
    /// The body was JSON `null`, so none of its fields can be read
    #[serde(skip)]
    pub null_body: bool,
}

/// Single chat message built from `prompt`, `text` or `input`
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Build a `user` message with plain text content
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Wrap as a one-element message list
    pub fn into_messages(self) -> Value {
        Value::Array(vec![serde_json::json!({
            "role": self.role,
            "content": self.content,
        })])
    }
}

/// Body sent to the upstream chat-completion endpoint
#[derive(Debug, Clone, Serialize)]
pub struct OutboundPayload {
    pub model: String,
    pub messages: Value,
    pub temperature: Value,
}

impl IncomingRequest {
    /// Parse a raw request body.
    ///
    /// An empty body is treated as `{}`. A JSON value that is not an object
    /// carries none of the recognised fields. A `null` body parses, but
    /// deriving messages from it fails.
    pub fn parse(body: &[u8]) -> RelayResult<Self> {
        if body.is_empty() {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Ok(Self {
                null_body: true,
                ..Self::default()
            }),
            value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
            _ => Ok(Self::default()),
        }
    }

    /// Derive the outbound message list, first match wins:
    /// `messages` verbatim, then `prompt`, then `text` or `input`.
    pub fn derive_messages(&self) -> RelayResult<Value> {
        if self.null_body {
            return Err(RelayError::Function(
                "Cannot read request fields from a null body".to_string(),
            ));
        }

        if let Some(messages) = present(&self.messages) {
            return Ok(messages.clone());
        }

        if let Some(prompt) = present(&self.prompt) {
            return Ok(ChatMessage::user(coerce_to_string(prompt)).into_messages());
        }

        let text = present(&self.text)
            .or_else(|| present(&self.input))
            .map(coerce_to_string)
            .unwrap_or_default();
        Ok(ChatMessage::user(text).into_messages())
    }

    /// Caller temperature, or [`DEFAULT_TEMPERATURE`] when absent or `null`
    pub fn temperature(&self) -> Value {
        self.temperature
            .clone()
            .unwrap_or_else(|| Value::from(DEFAULT_TEMPERATURE))
    }
}

/// Whether the first entry of a message list has truthy `content`.
///
/// The list is indexed like a JavaScript value, so an object keyed `"0"`
/// also counts as having a first entry.
pub fn first_message_has_content(messages: &Value) -> bool {
    messages
        .get(0)
        .or_else(|| messages.get("0"))
        .and_then(|first| first.get("content"))
        .is_some_and(is_truthy)
}

fn present(field: &Option<Value>) -> Option<&Value> {
    field.as_ref().filter(|v| is_truthy(v))
}

/// JavaScript truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a JSON value the way JavaScript's `String(value)` would
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(coerce_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
