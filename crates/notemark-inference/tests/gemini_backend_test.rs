//! Integration tests for the Gemini backend against a local mock server.

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notemark_core::{Error, GenerationBackend};
use notemark_inference::{normalize, EnhanceErrorKind, GeminiBackend, GeminiConfig};

fn backend_for(server: &MockServer) -> GeminiBackend {
    let config = GeminiConfig::new(
        server.uri(),
        "gemini-1.5-flash".to_string(),
        "test-key".to_string(),
    );
    GeminiBackend::new(config).unwrap()
}

fn candidates_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            {"content": {"parts": [{"text": text}], "role": "model"}}
        ]
    })
}

#[tokio::test]
async fn test_generate_returns_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidates_body("generated text")))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let text = backend.generate("some prompt").await.unwrap();
    assert_eq!(text, "generated text");
}

#[tokio::test]
async fn test_generate_sends_prompt_as_content_part() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"parts": [{"text": "exact prompt body"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidates_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    backend.generate("exact prompt body").await.unwrap();
}

#[tokio::test]
async fn test_generate_empty_candidates_yields_empty_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
        )
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    // The dispatcher, not the backend, decides that empty output is a failure.
    assert_eq!(backend.generate("prompt").await.unwrap(), "");
}

#[tokio::test]
async fn test_rejected_api_key_classifies_as_auth() {
    let server = MockServer::start().await;

    let error_body = serde_json::json!({
        "error": {
            "code": 400,
            "status": "INVALID_ARGUMENT",
            "message": "API key not valid. Please pass a valid API key.",
            "details": [{"reason": "API_KEY_INVALID"}]
        }
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_body))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend.generate("prompt").await.unwrap_err();
    assert!(matches!(err, Error::Inference(_)));

    let normalized = normalize(&err);
    assert_eq!(normalized.kind, EnhanceErrorKind::Auth);
    assert_eq!(normalized.status_code, 401);
}

#[tokio::test]
async fn test_upstream_server_error_classifies_as_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend.generate("prompt").await.unwrap_err();

    let normalized = normalize(&err);
    assert_eq!(normalized.kind, EnhanceErrorKind::Unknown);
    assert_eq!(normalized.status_code, 500);
    assert!(normalized.message.contains("internal failure"));
}

#[tokio::test]
async fn test_unreachable_host_classifies_as_connectivity() {
    // Nothing listens on the mock server's port once it is dropped.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let config = GeminiConfig::new(uri, "gemini-1.5-flash".to_string(), "test-key".to_string());
    let backend = GeminiBackend::new(config).unwrap();
    let err = backend.generate("prompt").await.unwrap_err();
    assert!(matches!(err, Error::Request(_)));

    let normalized = normalize(&err);
    assert_eq!(normalized.kind, EnhanceErrorKind::Connectivity);
    assert_eq!(normalized.status_code, 503);
}
