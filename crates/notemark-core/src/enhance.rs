//! Enhancement request/response shapes and inbound validation.
//!
//! Validation runs before any external call and collects every violated
//! field, so callers can render per-field feedback rather than fixing one
//! problem per round trip.

use serde::{Deserialize, Serialize};

use crate::actions::ActionKind;
use crate::error::{Error, Result, ValidationErrors};

/// Minimum accepted text length, in characters.
pub const MIN_TEXT_CHARS: usize = 10;

/// Maximum accepted text length, in characters.
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Raw wire shape of `POST /api/ai/enhance`. The action arrives as a free
/// string so unknown names surface as a validation failure instead of a
/// deserialization error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceRequestBody {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// A validated enhancement request. Constructed only by [`validate`];
/// `text` length bounds and `action` membership are already enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceRequest {
    pub text: String,
    pub action: ActionKind,
    pub language: Option<String>,
}

/// Raw model output, returned verbatim to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceResult {
    pub text: String,
}

/// Validate an inbound request body against shape and length constraints.
///
/// Every violated field is reported, not just the first. Character counts
/// use `char` boundaries, not bytes.
pub fn validate(body: &EnhanceRequestBody) -> Result<EnhanceRequest> {
    let mut violations = ValidationErrors::default();

    let text_chars = body.text.chars().count();
    if text_chars < MIN_TEXT_CHARS {
        violations.push(
            "text",
            format!("Text must be at least {} characters", MIN_TEXT_CHARS),
        );
    } else if text_chars > MAX_TEXT_CHARS {
        violations.push("text", "Text is too long");
    }

    let action = match body.action.parse::<ActionKind>() {
        Ok(action) => Some(action),
        Err(_) => {
            violations.push("action", format!("Invalid action: {}", body.action));
            None
        }
    };

    if action == Some(ActionKind::Translate) && body.language.is_none() {
        violations.push("language", "A target language is required for translate");
    }

    if !violations.is_empty() {
        return Err(Error::Validation(violations));
    }

    Ok(EnhanceRequest {
        text: body.text.clone(),
        // None is unreachable here: a missing action records a violation above.
        action: action.ok_or_else(|| Error::Internal("action missing after validation".into()))?,
        language: body.language.clone(),
    })
}
