//! Error types for notemark.

use thiserror::Error;

/// Result type alias using notemark's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// A single violated validation rule, tied to the field that violated it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldViolation {
    /// Name of the offending request field ("text", "action", "language").
    pub field: String,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violated field from one validation pass, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

/// Core error type for notemark operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(uuid::Uuid),

    /// Workspace not found
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(uuid::Uuid),

    /// Request failed validation; carries every violated field
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Authentication/authorization failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation(ValidationErrors(vec![FieldViolation::new(field, message)]))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

// =============================================================================
// NORMALIZED ENHANCEMENT ERRORS
// =============================================================================

/// Failure classes surfaced to enhancement callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhanceErrorKind {
    /// Caller sent malformed or out-of-range input; correct and resubmit.
    Validation,
    /// Upstream credential rejected; requires operator intervention.
    Auth,
    /// Transient network or upstream outage; retry immediately.
    Connectivity,
    /// Catch-all, including empty model output; retry may help.
    Unknown,
}

/// Uniform (kind, message, status code, recoverability) shape every
/// enhancement failure is reduced to before crossing the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceError {
    pub kind: EnhanceErrorKind,
    pub message: String,
    pub status_code: u16,
    pub recoverable: bool,
}

impl EnhanceError {
    pub fn new(
        kind: EnhanceErrorKind,
        message: impl Into<String>,
        status_code: u16,
        recoverable: bool,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code,
            recoverable,
        }
    }
}

impl std::fmt::Display for EnhanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("test resource".to_string());
        assert_eq!(err.to_string(), "Not found: test resource");
    }

    #[test]
    fn test_error_display_note_not_found() {
        let id = Uuid::nil();
        let err = Error::NoteNotFound(id);
        assert_eq!(err.to_string(), format!("Note not found: {}", id));
    }

    #[test]
    fn test_error_display_inference() {
        let err = Error::Inference("model timeout".to_string());
        assert_eq!(err.to_string(), "Inference error: model timeout");
    }

    #[test]
    fn test_error_display_request() {
        let err = Error::Request("network unreachable".to_string());
        assert_eq!(err.to_string(), "Request error: network unreachable");
    }

    #[test]
    fn test_error_display_unauthorized() {
        let err = Error::Unauthorized("invalid token".to_string());
        assert_eq!(err.to_string(), "Unauthorized: invalid token");
    }

    #[test]
    fn test_validation_display_joins_all_violations() {
        let mut violations = ValidationErrors::default();
        violations.push("text", "Text must be at least 10 characters");
        violations.push("action", "Invalid action: bogus");
        let err = Error::Validation(violations);
        let msg = err.to_string();
        assert!(msg.contains("text: Text must be at least 10 characters"));
        assert!(msg.contains("action: Invalid action: bogus"));
    }

    #[test]
    fn test_validation_shorthand() {
        let err = Error::validation("text", "Text is too long");
        match err {
            Error::Validation(v) => {
                assert_eq!(v.0.len(), 1);
                assert_eq!(v.0[0].field, "text");
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_enhance_error_display() {
        let err = EnhanceError::new(EnhanceErrorKind::Connectivity, "upstream down", 503, true);
        assert_eq!(err.to_string(), "upstream down (503)");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
        assert_send::<EnhanceError>();
        assert_sync::<EnhanceError>();
    }
}
