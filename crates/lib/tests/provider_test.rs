//! # Completion Provider Tests
//!
//! Exercises the OpenAI-compatible provider against a wiremock server,
//! asserting on the request wire shape and on error surfacing.

use std::time::Duration;
use synthgen::providers::ai::{CompletionProvider, CompletionRequest};
use synthgen::GenerationError;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chunk_request() -> CompletionRequest {
    CompletionRequest {
        system_prompt: "You are a synthetic data generator.".to_string(),
        user_prompt: "users".to_string(),
        temperature: 0.5,
        max_tokens: 1024,
    }
}

#[tokio::test]
async fn test_openai_provider_sends_sampling_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama3-8b-8192",
            "temperature": 0.5,
            "max_tokens": 1024,
            "stream": false,
            "messages": [
                {"role": "system", "content": "You are a synthetic data generator."},
                {"role": "user", "content": "users"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "[{\"id\":1}]"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = synthgen::providers::ai::openai::OpenAiProvider::new(
        format!("{}/v1/chat/completions", server.uri()),
        Some("test-key".to_string()),
        Some("llama3-8b-8192".to_string()),
        Duration::from_secs(5),
    )
    .unwrap();

    let content = provider.complete(&chunk_request()).await.unwrap();
    assert_eq!(content, "[{\"id\":1}]");
}

#[tokio::test]
async fn test_openai_provider_surfaces_api_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limit exceeded"))
        .mount(&server)
        .await;

    let provider = synthgen::providers::ai::openai::OpenAiProvider::new(
        server.uri(),
        None,
        None,
        Duration::from_secs(5),
    )
    .unwrap();

    let result = provider.complete(&chunk_request()).await;
    match result {
        Err(GenerationError::CompletionApi(body)) => {
            assert!(body.contains("rate limit exceeded"));
        }
        other => panic!("Expected CompletionApi error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_gemini_provider_parses_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "generationConfig": {"temperature": 0.5, "maxOutputTokens": 1024}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "[{\"id\":9}]"}]}}]
        })))
        .mount(&server)
        .await;

    let provider = synthgen::providers::ai::gemini::GeminiProvider::new(
        server.uri(),
        "test-key".to_string(),
        Duration::from_secs(5),
    )
    .unwrap();

    let content = provider.complete(&chunk_request()).await.unwrap();
    assert_eq!(content, "[{\"id\":9}]");
}
