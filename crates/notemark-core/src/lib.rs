//! # notemark-core
//!
//! Core types, traits, and abstractions for the notemark note-taking
//! backend.
//!
//! This crate provides the foundational data structures and trait
//! definitions that other notemark crates depend on: the domain models,
//! the enhancement action table and request validation, the error
//! taxonomy, and the note change event bus.

pub mod actions;
pub mod enhance;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use actions::{render_prompt, ActionKind};
pub use enhance::{
    validate, EnhanceRequest, EnhanceRequestBody, EnhanceResult, MAX_TEXT_CHARS, MIN_TEXT_CHARS,
};
pub use error::{
    EnhanceError, EnhanceErrorKind, Error, FieldViolation, Result, ValidationErrors,
};
pub use events::{EventBus, NoteChange, DEFAULT_EVENT_CAPACITY};
pub use models::*;
pub use traits::*;
