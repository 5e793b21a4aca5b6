//! # notemark-inference
//!
//! LLM text-generation backend abstraction for notemark.
//!
//! This crate provides:
//! - The enhancement dispatcher ([`EnhanceService`]) and failure
//!   normalization ([`normalize`])
//! - Gemini implementation of [`notemark_core::GenerationBackend`]
//!   (default, feature `gemini`)
//! - Mock backend for deterministic tests (feature `mock`)
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use notemark_core::{validate, EnhanceRequestBody};
//! use notemark_inference::{EnhanceService, GeminiBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = GeminiBackend::from_env().unwrap();
//!     let service = EnhanceService::new(Arc::new(backend));
//!
//!     let body = EnhanceRequestBody {
//!         text: "Ship the Q3 report and schedule the retro.".to_string(),
//!         action: "actionItems".to_string(),
//!         language: None,
//!     };
//!     let request = validate(&body).unwrap();
//!     let result = service.enhance(&request).await.unwrap();
//!     println!("{}", result.text);
//! }
//! ```

pub mod config;
pub mod enhance;

#[cfg(feature = "gemini")]
pub mod gemini;

// Mock generation backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use notemark_core::*;

pub use config::GeminiConfig;
pub use enhance::{
    normalize, EnhanceService, API_KEY_INVALID_MARKER, CONNECTIVITY_MARKER, EMPTY_OUTPUT_MESSAGE,
};

#[cfg(feature = "gemini")]
pub use gemini::GeminiBackend;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerationBackend;
