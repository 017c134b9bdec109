#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! HTTP-level tests for `GeminiClient` against a local mock server.

use std::time::Duration;

use keyswitch_provider::{
    CredentialValidator, FailureKind, GeminiClient, GenerateContentRequest, Part,
    ProviderConfig, ProviderError,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash";

fn direct_client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(ProviderConfig::default().with_api_base(server.uri()))
        .expect("client should build")
}

fn proxied_client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(
        ProviderConfig::default()
            .with_api_base("http://127.0.0.1:1")
            .with_proxy_url(Some(format!("{}/proxy/", server.uri()))),
    )
    .expect("client should build")
}

fn text_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

// ===== key validation =====

#[tokio::test]
async fn validate_accepts_on_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(query_param("key", "good-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not even json"))
        .expect(1)
        .mount(&server)
        .await;

    assert!(direct_client(&server).validate("good-key").await);
}

#[tokio::test]
async fn validate_rejects_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        })))
        .mount(&server)
        .await;

    assert!(!direct_client(&server).validate("bad-key").await);
}

#[tokio::test]
async fn validate_rejects_when_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    assert!(!direct_client(&server).validate("busy-key").await);
}

#[tokio::test]
async fn validate_unreachable_host_is_false() {
    let client = GeminiClient::new(
        ProviderConfig::default()
            .with_api_base("http://127.0.0.1:1")
            .with_request_timeout(Duration::from_secs(5)),
    )
    .expect("client should build");

    assert!(!client.validate("any-key").await);
}

// ===== generateContent =====

#[tokio::test]
async fn generate_text_direct() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{MODEL}:generateContent")))
        .and(query_param("key", "k1"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "Say hello"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let text = direct_client(&server)
        .generate_text("k1", MODEL, "Say hello")
        .await
        .expect("generation should succeed");
    assert_eq!(text, "hello");
}

#[tokio::test]
async fn generate_goes_through_proxy_with_client_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/proxy/v1/models/{MODEL}:generateContent")))
        .and(query_param("key", "k2"))
        .and(header("x-goog-api-client", "gemini-studio-web-proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("via proxy")))
        .expect(1)
        .mount(&server)
        .await;

    let text = proxied_client(&server)
        .generate_text("k2", MODEL, "hi")
        .await
        .expect("generation should succeed");
    assert_eq!(text, "via proxy");
}

#[tokio::test]
async fn generate_bad_key_maps_to_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let err = direct_client(&server)
        .generate_text("bad", MODEL, "hi")
        .await
        .expect_err("bad key should fail");
    assert!(
        matches!(err, ProviderError::InvalidCredentials { .. }),
        "{err:?}"
    );
    assert_eq!(err.failure_kind(), FailureKind::Auth);
}

#[tokio::test]
async fn generate_rate_limited_maps_to_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "7")
                .set_body_string("slow down"),
        )
        .mount(&server)
        .await;

    let err = direct_client(&server)
        .generate_text("k", MODEL, "hi")
        .await
        .expect_err("429 should fail");
    assert!(
        matches!(
            err,
            ProviderError::RateLimited {
                retry_after: Some(7),
                ..
            }
        ),
        "{err:?}"
    );
    assert_eq!(err.failure_kind(), FailureKind::Quota);
}

#[tokio::test]
async fn generate_blocked_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
        )
        .mount(&server)
        .await;

    let err = direct_client(&server)
        .generate_text("k", MODEL, "something bad")
        .await
        .expect_err("blocked prompt should fail");
    assert_eq!(err.failure_kind(), FailureKind::SafetyBlock);
}

#[tokio::test]
async fn generate_images_requires_inline_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "generationConfig": {"responseModalities": ["IMAGE", "TEXT"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("no pictures")))
        .mount(&server)
        .await;

    let request = GenerateContentRequest::from_parts(vec![Part::text("a cat")]);
    let err = direct_client(&server)
        .generate_images("k", MODEL, request, 4)
        .await
        .expect_err("text-only response should fail");
    assert!(matches!(err, ProviderError::EmptyResponse { .. }), "{err:?}");
}

#[tokio::test]
async fn generate_images_truncates_to_limit() {
    let server = MockServer::start().await;
    let parts: Vec<serde_json::Value> = (0..5)
        .map(|i| json!({"inlineData": {"mimeType": "image/png", "data": format!("img{i}")}}))
        .collect();
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": parts}}]
        })))
        .mount(&server)
        .await;

    let images = direct_client(&server)
        .generate_images("k", MODEL, GenerateContentRequest::from_prompt("cats"), 4)
        .await
        .expect("images should come back");
    assert_eq!(images.len(), 4);
    assert_eq!(images[0], "data:image/png;base64,img0");
}
