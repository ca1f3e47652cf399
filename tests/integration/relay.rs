//! Relay endpoint integration tests
//!
//! Tests for the relay endpoint:
//! - OPTIONS preflight
//! - Message derivation and outbound payload
//! - Pass-through of successful upstream bodies
//! - Error taxonomy (provider, credential, message, upstream, crash)

use axum::http::{header, Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{constants, has_cors, RelayTestHarness};

// =============================================================================
// Preflight
// =============================================================================

#[tokio::test]
async fn test_options_returns_preflight() {
    let harness = RelayTestHarness::new().await;

    let response = harness
        .server
        .method(Method::OPTIONS, constants::RELAY_PATH)
        .text("this is not json")
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(response.text(), "");
    let headers = response.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(
        headers.get("access-control-allow-headers").unwrap(),
        "Content-Type, Authorization"
    );
    assert_eq!(
        headers.get("access-control-allow-methods").unwrap(),
        "POST, OPTIONS"
    );
    assert!(harness.openrouter.received_requests().await.is_empty());
}

// =============================================================================
// Request derivation
// =============================================================================

#[tokio::test]
async fn test_empty_body_is_missing_message() {
    let harness = RelayTestHarness::new().await;

    let response = harness.server.post(constants::RELAY_PATH).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(has_cors(response.headers()));
    assert_eq!(
        response.json::<Value>(),
        json!({"ok": false, "error": "Missing prompt/messages in request body"})
    );
    assert!(harness.openrouter.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_prompt_is_wrapped_with_default_temperature() {
    let harness = RelayTestHarness::new().await;
    harness.openrouter.mock_chat_completion_success("Hi there").await;

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({"prompt": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        harness.openrouter.single_request_body().await,
        json!({
            "model": constants::TEST_MODEL,
            "messages": [{"role": "user", "content": "hello"}],
            "temperature": 0.2
        })
    );
}

#[tokio::test]
async fn test_text_and_input_fallbacks() {
    let harness = RelayTestHarness::new().await;
    harness.openrouter.mock_chat_completion_success("ok").await;

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({"input": "from input", "temperature": 0}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = harness.openrouter.single_request_body().await;
    assert_eq!(body["messages"], json!([{"role": "user", "content": "from input"}]));
    assert_eq!(body["temperature"], json!(0));
}

#[tokio::test]
async fn test_upstream_request_headers() {
    let harness = RelayTestHarness::new().await;
    harness.openrouter.mock_chat_completion_success("ok").await;

    harness
        .server
        .post(constants::RELAY_PATH)
        .add_header(
            header::AUTHORIZATION,
            "Bearer client-token".parse().unwrap(),
        )
        .json(&json!({"prompt": "hello"}))
        .await;

    let requests = harness.openrouter.received_requests().await;
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    assert_eq!(
        headers.get("authorization").unwrap(),
        format!("Bearer {}", constants::TEST_OPENROUTER_API_KEY).as_str()
    );
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
    assert_eq!(
        headers.get("http-referer").unwrap(),
        "https://super-sfogliatella-edee76.netlify.app"
    );
    assert_eq!(headers.get("x-title").unwrap(), "Royal Ray Zone");
}

#[tokio::test]
async fn test_configured_model_is_used_not_fallback() {
    let harness = RelayTestHarness::with_env(&[
        ("MODEL_TEXT", "anthropic/claude-3.5-sonnet"),
        ("MODEL_TEXT_FALLBACK", "meta-llama/llama-3-8b-instruct"),
    ])
    .await;
    harness.openrouter.mock_chat_completion_success("ok").await;

    harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({"prompt": "hello"}))
        .await;

    let body = harness.openrouter.single_request_body().await;
    assert_eq!(body["model"], "anthropic/claude-3.5-sonnet");
}

// =============================================================================
// Pass-through
// =============================================================================

#[tokio::test]
async fn test_success_body_is_byte_identical() {
    let harness = RelayTestHarness::new().await;
    harness
        .openrouter
        .mock_chat_completion_raw(200, r#"{"id":"x"}"#)
        .await;

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({
            "messages": [{"role": "user", "content": "hi"}],
            "temperature": 0.9
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), r#"{"id":"x"}"#);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert!(has_cors(response.headers()));

    let body = harness.openrouter.single_request_body().await;
    assert_eq!(body["messages"], json!([{"role": "user", "content": "hi"}]));
    assert_eq!(body["temperature"], json!(0.9));
}

#[tokio::test]
async fn test_messages_reach_upstream_unchanged() {
    let harness = RelayTestHarness::new().await;
    harness.openrouter.mock_chat_completion_raw(200, "{}").await;
    let messages = json!([
        {"role": "system", "content": "be brief"},
        {"role": "assistant", "content": null, "tool_calls": [{"id": "t1"}]},
        {"role": 3, "content": "odd role"}
    ]);

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({"messages": messages.clone()}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = harness.openrouter.single_request_body().await;
    assert_eq!(body["messages"], messages);
}

#[tokio::test]
async fn test_string_message_list_is_missing_message() {
    let harness = RelayTestHarness::new().await;

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({"messages": ["hi"]}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(has_cors(response.headers()));
    assert_eq!(
        response.json::<Value>()["error"],
        "Missing prompt/messages in request body"
    );
    assert!(harness.openrouter.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_success_body_keeps_upstream_formatting() {
    let harness = RelayTestHarness::new().await;
    let raw = "{\n  \"id\" : \"x\",\n  \"score\": 1.50\n}\n";
    harness.openrouter.mock_chat_completion_raw(200, raw).await;

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({"prompt": "hello"}))
        .await;

    assert_eq!(response.text(), raw);
}

#[tokio::test]
async fn test_netlify_path_alias() {
    let harness = RelayTestHarness::new().await;
    harness
        .openrouter
        .mock_chat_completion_raw(200, r#"{"id":"y"}"#)
        .await;

    let response = harness
        .server
        .post("/.netlify/functions/ai")
        .json(&json!({"prompt": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), r#"{"id":"y"}"#);
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_upstream_error_becomes_bad_gateway() {
    let harness = RelayTestHarness::new().await;
    harness
        .openrouter
        .mock_chat_completion_raw(503, "rate limited")
        .await;

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({"prompt": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert!(has_cors(response.headers()));
    let body = response.json::<Value>();
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "AI upstream error");
    assert_eq!(body["upstream_status"], 503);
    assert_eq!(body["upstream_statusText"], "Service Unavailable");
    assert!(body["upstream_body"]
        .as_str()
        .unwrap()
        .starts_with("rate limited"));
}

#[tokio::test]
async fn test_upstream_error_body_is_truncated() {
    let harness = RelayTestHarness::new().await;
    let long_body = "e".repeat(4096);
    harness
        .openrouter
        .mock_chat_completion_raw(400, &long_body)
        .await;

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({"prompt": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body = response.json::<Value>();
    assert_eq!(body["upstream_status"], 400);
    assert_eq!(body["upstream_body"].as_str().unwrap().len(), 2000);
}

#[tokio::test]
async fn test_unsupported_provider_makes_no_upstream_call() {
    let harness = RelayTestHarness::with_env(&[("AI_PROVIDER", "anthropic")]).await;

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({"prompt": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(has_cors(response.headers()));
    assert_eq!(
        response.json::<Value>(),
        json!({"ok": false, "error": "Unsupported provider", "provider": "anthropic"})
    );
    assert!(harness.openrouter.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_provider_name_is_case_insensitive() {
    let harness = RelayTestHarness::with_env(&[("AI_PROVIDER", "OpenRouter")]).await;
    harness.openrouter.mock_chat_completion_success("ok").await;

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({"prompt": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_api_key_makes_no_upstream_call() {
    let harness = RelayTestHarness::without_api_key().await;

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({"prompt": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(has_cors(response.headers()));
    assert_eq!(
        response.json::<Value>(),
        json!({"ok": false, "error": "Missing OPENROUTER_API_KEY"})
    );
    assert!(harness.openrouter.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_function_error_without_cors() {
    let harness = RelayTestHarness::new().await;

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .text("{\"prompt\": ")
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!has_cors(response.headers()));
    let body = response.json::<Value>();
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Function error");
    assert!(body["details"].is_string());
    assert!(harness.openrouter.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_unreachable_upstream_is_function_error() {
    let harness = RelayTestHarness::with_env(&[("OPENROUTER_API_URL", "http://127.0.0.1:1")]).await;

    let response = harness
        .server
        .post(constants::RELAY_PATH)
        .json(&json!({"prompt": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!has_cors(response.headers()));
    assert_eq!(response.json::<Value>()["error"], "Function error");
}
