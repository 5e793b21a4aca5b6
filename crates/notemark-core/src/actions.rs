//! AI enhancement actions and the per-action prompt table.
//!
//! Each action maps to a fixed natural-language instruction prefix. The
//! mapping is an exhaustive match, so adding a variant without a prompt is a
//! compile error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The closed set of text transformations a caller may request.
///
/// `Translate` is the only variant that needs a target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Summarize,
    Expand,
    Improve,
    Simplify,
    Translate,
    Tags,
    Questions,
    ActionItems,
    Outline,
    Critique,
}

impl ActionKind {
    /// Every variant, in menu order.
    pub const ALL: [ActionKind; 10] = [
        ActionKind::Summarize,
        ActionKind::Expand,
        ActionKind::Improve,
        ActionKind::Simplify,
        ActionKind::Translate,
        ActionKind::Tags,
        ActionKind::Questions,
        ActionKind::ActionItems,
        ActionKind::Outline,
        ActionKind::Critique,
    ];

    /// Wire name as it appears in request bodies (camelCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Summarize => "summarize",
            ActionKind::Expand => "expand",
            ActionKind::Improve => "improve",
            ActionKind::Simplify => "simplify",
            ActionKind::Translate => "translate",
            ActionKind::Tags => "tags",
            ActionKind::Questions => "questions",
            ActionKind::ActionItems => "actionItems",
            ActionKind::Outline => "outline",
            ActionKind::Critique => "critique",
        }
    }

    /// True if this action needs a target language before it can dispatch.
    pub fn requires_language(&self) -> bool {
        matches!(self, ActionKind::Translate)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "summarize" => Ok(ActionKind::Summarize),
            "expand" => Ok(ActionKind::Expand),
            "improve" => Ok(ActionKind::Improve),
            "simplify" => Ok(ActionKind::Simplify),
            "translate" => Ok(ActionKind::Translate),
            "tags" => Ok(ActionKind::Tags),
            "questions" => Ok(ActionKind::Questions),
            "actionItems" => Ok(ActionKind::ActionItems),
            "outline" => Ok(ActionKind::Outline),
            "critique" => Ok(ActionKind::Critique),
            other => Err(Error::validation(
                "action",
                format!("Invalid action: {}", other),
            )),
        }
    }
}

/// Render the full prompt for an action: the fixed instruction, a colon and
/// blank line, then the user text verbatim.
///
/// Pure function; identical arguments always yield identical output.
/// `Translate` interpolates the target language into the instruction and
/// refuses to render without one.
pub fn render_prompt(action: ActionKind, text: &str, language: Option<&str>) -> Result<String> {
    let instruction = match action {
        ActionKind::Summarize => {
            "Create a brief, concise summary of the following text. Focus on key points".to_string()
        }
        ActionKind::Expand => {
            "Expand the following text with more details, examples, and explanations while maintaining the original meaning"
                .to_string()
        }
        ActionKind::Improve => {
            "Improve the writing quality, grammar, clarity, and flow of the following text"
                .to_string()
        }
        ActionKind::Simplify => {
            "Simplify the following text to make it easier to understand. Use simple language and shorter sentences"
                .to_string()
        }
        ActionKind::Translate => {
            let language = language.ok_or_else(|| {
                Error::validation("language", "A target language is required for translate")
            })?;
            format!(
                "Translate the following text to {}. Maintain the original formatting and meaning",
                language
            )
        }
        ActionKind::Tags => {
            "Generate 5-7 relevant tags for the following text. Return ONLY the tags as a comma-separated list"
                .to_string()
        }
        ActionKind::Questions => {
            "Generate 5-7 study questions based on the following text".to_string()
        }
        ActionKind::ActionItems => {
            "Extract all action items from the following text. Format as a bullet list".to_string()
        }
        ActionKind::Outline => {
            "Create a structured outline of the main points in the following text".to_string()
        }
        ActionKind::Critique => {
            "Provide constructive feedback and suggestions to improve the following text"
                .to_string()
        }
    };

    Ok(format!("{}:\n\n{}", instruction, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_wire_names() {
        for action in ActionKind::ALL {
            let parsed: ActionKind = action.as_str().parse().unwrap();
            assert_eq!(parsed, action);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown_action() {
        let err = "bogus".parse::<ActionKind>().unwrap_err();
        assert!(err.to_string().contains("Invalid action: bogus"));
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_string(&ActionKind::ActionItems).unwrap();
        assert_eq!(json, "\"actionItems\"");
        let back: ActionKind = serde_json::from_str("\"actionItems\"").unwrap();
        assert_eq!(back, ActionKind::ActionItems);
    }

    #[test]
    fn test_prompt_starts_with_instruction_and_ends_with_text() {
        let text = "some note content here";
        for action in ActionKind::ALL {
            let language = action.requires_language().then_some("French");
            let prompt = render_prompt(action, text, language).unwrap();
            assert!(prompt.ends_with(&format!(":\n\n{}", text)), "{}", action);
        }
    }

    #[test]
    fn test_summarize_prompt_instruction() {
        let prompt = render_prompt(ActionKind::Summarize, "abc", None).unwrap();
        assert!(prompt.starts_with("Create a brief, concise summary"));
    }

    #[test]
    fn test_translate_interpolates_language_once() {
        let prompt = render_prompt(ActionKind::Translate, "hello there", Some("Japanese")).unwrap();
        assert_eq!(prompt.matches("Japanese").count(), 1);
        assert!(prompt.contains("Maintain the original formatting and meaning"));
    }

    #[test]
    fn test_translate_without_language_fails() {
        let err = render_prompt(ActionKind::Translate, "hello there", None).unwrap_err();
        match err {
            Error::Validation(v) => assert_eq!(v.0[0].field, "language"),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_render_prompt_is_idempotent() {
        let a = render_prompt(ActionKind::Tags, "text body", None).unwrap();
        let b = render_prompt(ActionKind::Tags, "text body", None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_translate_ignores_language() {
        let with = render_prompt(ActionKind::Outline, "text", Some("German")).unwrap();
        let without = render_prompt(ActionKind::Outline, "text", None).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_only_translate_requires_language() {
        for action in ActionKind::ALL {
            assert_eq!(
                action.requires_language(),
                action == ActionKind::Translate,
                "{}",
                action
            );
        }
    }
}
