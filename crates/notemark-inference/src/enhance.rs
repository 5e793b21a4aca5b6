//! Enhancement dispatcher and failure normalization.
//!
//! The dispatcher renders the action prompt, makes exactly one generation
//! call, and returns the model text verbatim. Every failure leaving the
//! pipeline is classified by [`normalize`] exactly once at the boundary, so
//! callers only ever see the four-kind taxonomy with a human-readable
//! message and a status code.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error};

use notemark_core::{
    render_prompt, EnhanceError, EnhanceErrorKind, EnhanceRequest, EnhanceResult, Error,
    GenerationBackend, Result,
};

/// Substring a provider error message carries when the API key was rejected.
pub const API_KEY_INVALID_MARKER: &str = "API_KEY_INVALID";

/// Substring marking a transport-level connectivity failure.
pub const CONNECTIVITY_MARKER: &str = "fetch failed";

/// Message of the dispatcher's own empty-output failure. Already
/// user-facing, so [`normalize`] passes it through without the provider
/// prefix.
pub const EMPTY_OUTPUT_MESSAGE: &str = "Failed to generate content";

/// Dispatches validated enhancement requests to a generation backend.
#[derive(Clone)]
pub struct EnhanceService {
    backend: Arc<dyn GenerationBackend>,
}

impl EnhanceService {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Model name of the underlying backend.
    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    /// Run one enhancement: render the prompt, make a single external call,
    /// and hand back the generated text untransformed.
    ///
    /// Callers own any reformatting (the comma-separated `tags` convention
    /// is a prompt-level contract, not enforced here). Empty model output
    /// is a failure; whitespace-only output is returned as-is.
    pub async fn enhance(&self, request: &EnhanceRequest) -> Result<EnhanceResult> {
        let prompt = render_prompt(request.action, &request.text, request.language.as_deref())?;

        debug!(
            action = %request.action,
            prompt_len = prompt.len(),
            model = self.backend.model_name(),
            "Dispatching enhancement"
        );

        let start = Instant::now();
        let generated = self.backend.generate(&prompt).await?;

        if generated.is_empty() {
            return Err(Error::Inference(EMPTY_OUTPUT_MESSAGE.to_string()));
        }

        debug!(
            action = %request.action,
            response_len = generated.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Enhancement complete"
        );

        Ok(EnhanceResult { text: generated })
    }
}

/// Classify a pipeline failure into the uniform caller-facing shape.
///
/// Classification rules, in priority order: already-structured application
/// errors keep their class; an API-key-invalid marker means the upstream
/// credential was rejected (401); a connectivity marker or transport error
/// means a transient outage (503); everything else is unknown (500) with
/// the original message preserved as a diagnostic suffix. The original
/// error is logged here, once, before the result crosses the HTTP boundary.
pub fn normalize(err: &Error) -> EnhanceError {
    let normalized = match err {
        Error::Validation(_) | Error::InvalidInput(_) => {
            EnhanceError::new(EnhanceErrorKind::Validation, err.to_string(), 400, true)
        }
        Error::Unauthorized(_) => auth_failure(),
        Error::Request(_) => connectivity_failure(),
        Error::Inference(m) if m == EMPTY_OUTPUT_MESSAGE => {
            EnhanceError::new(EnhanceErrorKind::Unknown, m.clone(), 500, true)
        }
        other => {
            let message = other.to_string();
            if message.contains(API_KEY_INVALID_MARKER) {
                auth_failure()
            } else if message.contains(CONNECTIVITY_MARKER) {
                connectivity_failure()
            } else {
                let detail = match other {
                    Error::Inference(m) if !m.is_empty() => m.clone(),
                    _ if !message.is_empty() => message,
                    _ => "Unknown error".to_string(),
                };
                EnhanceError::new(
                    EnhanceErrorKind::Unknown,
                    format!("AI service error: {}", detail),
                    500,
                    true,
                )
            }
        }
    };

    error!(
        error = %err,
        error_kind = ?normalized.kind,
        status = normalized.status_code,
        recoverable = normalized.recoverable,
        "Enhancement failed"
    );

    normalized
}

fn auth_failure() -> EnhanceError {
    EnhanceError::new(
        EnhanceErrorKind::Auth,
        "Invalid Google API key. Please check your GEMINI_API_KEY.",
        401,
        true,
    )
}

fn connectivity_failure() -> EnhanceError {
    EnhanceError::new(
        EnhanceErrorKind::Connectivity,
        "AI service connectivity issue. Please check your internet or try again later.",
        503,
        true,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGenerationBackend;
    use notemark_core::ActionKind;

    fn request(action: ActionKind, text: &str) -> EnhanceRequest {
        EnhanceRequest {
            text: text.to_string(),
            action,
            language: None,
        }
    }

    #[tokio::test]
    async fn test_enhance_returns_model_text_verbatim() {
        let backend = MockGenerationBackend::new().with_fixed_response("  enhanced text  ");
        let service = EnhanceService::new(Arc::new(backend));

        let result = service
            .enhance(&request(ActionKind::Improve, &"a".repeat(50)))
            .await
            .unwrap();
        assert_eq!(result.text, "  enhanced text  ");
    }

    #[tokio::test]
    async fn test_enhance_makes_exactly_one_call_with_rendered_prompt() {
        let backend = MockGenerationBackend::new().with_fixed_response("summary");
        let service = EnhanceService::new(Arc::new(backend.clone()));

        let text = "A".repeat(50);
        service
            .enhance(&request(ActionKind::Summarize, &text))
            .await
            .unwrap();

        let prompts = backend.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Create a brief, concise summary"));
        assert!(prompts[0].ends_with(&text));
    }

    #[tokio::test]
    async fn test_enhance_empty_output_is_failure() {
        let backend = MockGenerationBackend::new().with_fixed_response("");
        let service = EnhanceService::new(Arc::new(backend));

        let err = service
            .enhance(&request(ActionKind::Summarize, &"a".repeat(50)))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to generate content"));

        // Already user-facing: normalize keeps the message unprefixed.
        let normalized = normalize(&err);
        assert_eq!(normalized.kind, EnhanceErrorKind::Unknown);
        assert_eq!(normalized.status_code, 500);
        assert_eq!(normalized.message, EMPTY_OUTPUT_MESSAGE);
    }

    #[tokio::test]
    async fn test_enhance_whitespace_output_passes_through() {
        let backend = MockGenerationBackend::new().with_fixed_response("   ");
        let service = EnhanceService::new(Arc::new(backend));

        let result = service
            .enhance(&request(ActionKind::Summarize, &"a".repeat(50)))
            .await
            .unwrap();
        assert_eq!(result.text, "   ");
    }

    #[tokio::test]
    async fn test_enhance_backend_error_propagates_unclassified() {
        let backend =
            MockGenerationBackend::new().with_inference_error("Gemini returned 500: boom");
        let service = EnhanceService::new(Arc::new(backend));

        let err = service
            .enhance(&request(ActionKind::Summarize, &"a".repeat(50)))
            .await
            .unwrap_err();
        match err {
            Error::Inference(msg) => assert!(msg.contains("boom")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_normalize_api_key_marker_is_auth_401() {
        let err = Error::Inference(format!("Gemini returned 400: {}", API_KEY_INVALID_MARKER));
        let normalized = normalize(&err);
        assert_eq!(normalized.kind, EnhanceErrorKind::Auth);
        assert_eq!(normalized.status_code, 401);
        assert!(normalized.recoverable);
        // User-facing message, not raw provider text.
        assert!(!normalized.message.contains("Gemini returned"));
    }

    #[test]
    fn test_normalize_fetch_failed_marker_is_connectivity_503() {
        let err = Error::Inference("fetch failed".to_string());
        let normalized = normalize(&err);
        assert_eq!(normalized.kind, EnhanceErrorKind::Connectivity);
        assert_eq!(normalized.status_code, 503);
        assert!(normalized.recoverable);
    }

    #[test]
    fn test_normalize_transport_error_is_connectivity_503() {
        let err = Error::Request("Request failed: connection refused".to_string());
        let normalized = normalize(&err);
        assert_eq!(normalized.kind, EnhanceErrorKind::Connectivity);
        assert_eq!(normalized.status_code, 503);
    }

    #[test]
    fn test_normalize_unknown_preserves_original_message() {
        let err = Error::Inference("model exploded".to_string());
        let normalized = normalize(&err);
        assert_eq!(normalized.kind, EnhanceErrorKind::Unknown);
        assert_eq!(normalized.status_code, 500);
        assert!(normalized.message.starts_with("AI service error: "));
        assert!(normalized.message.contains("model exploded"));
    }

    #[test]
    fn test_normalize_validation_keeps_class() {
        let err = Error::validation("text", "Text is too long");
        let normalized = normalize(&err);
        assert_eq!(normalized.kind, EnhanceErrorKind::Validation);
        assert_eq!(normalized.status_code, 400);
        assert!(normalized.message.contains("Text is too long"));
    }

    #[test]
    fn test_normalize_priority_auth_before_connectivity() {
        // Both markers present: the API-key rule wins.
        let err = Error::Inference(format!("{} after fetch failed", API_KEY_INVALID_MARKER));
        let normalized = normalize(&err);
        assert_eq!(normalized.kind, EnhanceErrorKind::Auth);
    }
}
