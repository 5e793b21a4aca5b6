//! Mock generation backend for deterministic testing.
//!
//! Responses are configured up front; every prompt is logged so tests can
//! assert on call counts and prompt contents.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use notemark_core::{Error, GenerationBackend, Result};

/// Failure injected in place of a generated response.
#[derive(Debug, Clone)]
enum MockFailure {
    Inference(String),
    Request(String),
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    fixed_responses: HashMap<String, String>,
    default_response: String,
    failure: Option<MockFailure>,
}

/// Mock generation backend.
#[derive(Clone)]
pub struct MockGenerationBackend {
    config: Arc<MockConfig>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerationBackend {
    /// Create a mock that answers every prompt with "Mock response".
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig {
                default_response: "Mock response".to_string(),
                ..MockConfig::default()
            }),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response returned for any prompt without a mapping.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Map a specific prompt to a specific response.
    pub fn with_response_mapping(
        mut self,
        prompt: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fixed_responses
            .insert(prompt.into(), response.into());
        self
    }

    /// Fail every call with an inference error carrying `message`.
    pub fn with_inference_error(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).failure = Some(MockFailure::Inference(message.into()));
        self
    }

    /// Fail every call with a transport-level request error.
    pub fn with_request_error(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).failure = Some(MockFailure::Request(message.into()));
        self
    }

    /// All prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("mock lock poisoned").clone()
    }

    /// Number of generation calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().expect("mock lock poisoned").len()
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .expect("mock lock poisoned")
            .push(prompt.to_string());

        if let Some(failure) = &self.config.failure {
            return Err(match failure {
                MockFailure::Inference(msg) => Error::Inference(msg.clone()),
                MockFailure::Request(msg) => Error::Request(msg.clone()),
            });
        }

        if let Some(response) = self.config.fixed_responses.get(prompt) {
            return Ok(response.clone());
        }

        Ok(self.config.default_response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
