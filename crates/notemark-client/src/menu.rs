//! Enhance menu state machine.
//!
//! Drives which action the user is invoking, the language sub-selection for
//! translate, and the loading/disabled state of the trigger control. The
//! host UI owns rendering and the network call; this type owns the
//! transitions and their guards.
//!
//! At most one enhancement request is in flight per menu instance: the
//! trigger is disabled for the whole of `Loading`, and completion always
//! returns the machine to `Closed`, success or failure.

use thiserror::Error;

use notemark_core::{ActionKind, EnhanceError, EnhanceRequestBody, EnhanceResult, MIN_TEXT_CHARS};

/// Languages offered in the translate submenu.
pub const LANGUAGES: [&str; 10] = [
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Chinese",
    "Japanese",
    "Korean",
    "Hindi",
    "Arabic",
];

/// Menu states. `Loading` remembers the action so the UI can word its
/// progress message ("AI is translating..." vs "AI is working...").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    ActionMenuOpen,
    LanguageMenuOpen { action: ActionKind },
    Loading { action: ActionKind },
}

/// Where a successful result lands. Chosen by the caller context; the menu
/// never decides this itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSink {
    /// Append after the current body, separated by a blank line.
    Insert,
    /// Overwrite the body.
    Replace,
}

/// What selecting an action led to.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// Translate needs a language first; the submenu is now open.
    LanguagePicker,
    /// The request below should be POSTed; the menu closed and is loading.
    Request(EnhanceRequestBody),
}

/// Outcome of a finished request, for the host UI to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// New note body after routing the result through the sink.
    Applied { content: String },
    /// Normalized failure message for a transient toast.
    Failed { message: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("Please write some content first (at least {} characters)", MIN_TEXT_CHARS)]
    ContentTooShort,
    #[error("Menu is not open")]
    NotOpen,
    #[error("An enhancement is already in flight")]
    RequestInFlight,
}

/// The enhance menu controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceMenu {
    state: MenuState,
}

impl EnhanceMenu {
    pub fn new() -> Self {
        Self {
            state: MenuState::Closed,
        }
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    /// True while a request is in flight; the host UI must disable the
    /// trigger control for the duration.
    pub fn is_trigger_disabled(&self) -> bool {
        matches!(self.state, MenuState::Loading { .. })
    }

    /// Open the action menu. Refused while a request is in flight.
    pub fn open(&mut self) -> Result<(), MenuError> {
        match self.state {
            MenuState::Loading { .. } => Err(MenuError::RequestInFlight),
            _ => {
                self.state = MenuState::ActionMenuOpen;
                Ok(())
            }
        }
    }

    /// Dismiss any open menu without dispatching (backdrop click, Escape).
    /// Does not interrupt an in-flight request.
    pub fn dismiss(&mut self) {
        if !self.is_trigger_disabled() {
            self.state = MenuState::Closed;
        }
    }

    /// Select an action from the open menu.
    ///
    /// Content shorter than the validator's minimum is refused here as a
    /// fast-fail; server-side validation remains authoritative.
    pub fn select_action(
        &mut self,
        action: ActionKind,
        content: &str,
    ) -> Result<SelectOutcome, MenuError> {
        if self.state != MenuState::ActionMenuOpen {
            return Err(MenuError::NotOpen);
        }
        Self::check_content(content)?;

        if action.requires_language() {
            self.state = MenuState::LanguageMenuOpen { action };
            return Ok(SelectOutcome::LanguagePicker);
        }

        self.state = MenuState::Loading { action };
        Ok(SelectOutcome::Request(Self::request(action, content, None)))
    }

    /// Choose a language from the translate submenu.
    pub fn select_language(
        &mut self,
        language: &str,
        content: &str,
    ) -> Result<EnhanceRequestBody, MenuError> {
        let action = match self.state {
            MenuState::LanguageMenuOpen { action } => action,
            _ => return Err(MenuError::NotOpen),
        };
        Self::check_content(content)?;

        self.state = MenuState::Loading { action };
        Ok(Self::request(action, content, Some(language)))
    }

    /// Finish the in-flight request. Loading is always cleared, success or
    /// failure; success routes the result text through the caller-chosen
    /// sink, failure yields the normalized message for a toast.
    pub fn complete(
        &mut self,
        current_content: &str,
        sink: ResultSink,
        outcome: Result<EnhanceResult, EnhanceError>,
    ) -> Completion {
        self.state = MenuState::Closed;
        match outcome {
            Ok(result) => Completion::Applied {
                content: apply_result(current_content, sink, &result.text),
            },
            Err(err) => Completion::Failed {
                message: err.message,
            },
        }
    }

    fn check_content(content: &str) -> Result<(), MenuError> {
        if content.trim().chars().count() < MIN_TEXT_CHARS {
            return Err(MenuError::ContentTooShort);
        }
        Ok(())
    }

    fn request(action: ActionKind, content: &str, language: Option<&str>) -> EnhanceRequestBody {
        EnhanceRequestBody {
            text: content.to_string(),
            action: action.as_str().to_string(),
            language: language.map(String::from),
        }
    }
}

impl Default for EnhanceMenu {
    fn default() -> Self {
        Self::new()
    }
}

/// Route result text into the note body.
pub fn apply_result(current: &str, sink: ResultSink, text: &str) -> String {
    match sink {
        ResultSink::Replace => text.to_string(),
        ResultSink::Insert if current.is_empty() => text.to_string(),
        ResultSink::Insert => format!("{}\n\n{}", current, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notemark_core::EnhanceErrorKind;

    const CONTENT: &str = "long enough note body";

    #[test]
    fn test_initial_state_is_closed() {
        let menu = EnhanceMenu::new();
        assert_eq!(*menu.state(), MenuState::Closed);
        assert!(!menu.is_trigger_disabled());
    }

    #[test]
    fn test_summarize_goes_straight_to_loading() {
        let mut menu = EnhanceMenu::new();
        menu.open().unwrap();

        let outcome = menu.select_action(ActionKind::Summarize, CONTENT).unwrap();
        match outcome {
            SelectOutcome::Request(body) => {
                assert_eq!(body.action, "summarize");
                assert_eq!(body.text, CONTENT);
                assert!(body.language.is_none());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(
            *menu.state(),
            MenuState::Loading {
                action: ActionKind::Summarize
            }
        );
        assert!(menu.is_trigger_disabled());
    }

    #[test]
    fn test_translate_opens_language_menu_not_loading() {
        let mut menu = EnhanceMenu::new();
        menu.open().unwrap();

        let outcome = menu.select_action(ActionKind::Translate, CONTENT).unwrap();
        assert_eq!(outcome, SelectOutcome::LanguagePicker);
        assert_eq!(
            *menu.state(),
            MenuState::LanguageMenuOpen {
                action: ActionKind::Translate
            }
        );
        assert!(!menu.is_trigger_disabled());
    }

    #[test]
    fn test_language_choice_dispatches() {
        let mut menu = EnhanceMenu::new();
        menu.open().unwrap();
        menu.select_action(ActionKind::Translate, CONTENT).unwrap();

        let body = menu.select_language("French", CONTENT).unwrap();
        assert_eq!(body.action, "translate");
        assert_eq!(body.language.as_deref(), Some("French"));
        assert!(menu.is_trigger_disabled());
    }

    #[test]
    fn test_short_content_is_refused_with_toastable_message() {
        let mut menu = EnhanceMenu::new();
        menu.open().unwrap();

        let err = menu.select_action(ActionKind::Summarize, "short").unwrap_err();
        assert_eq!(err, MenuError::ContentTooShort);
        assert!(err.to_string().contains("at least 10 characters"));
        // No request was started.
        assert!(!menu.is_trigger_disabled());
    }

    #[test]
    fn test_trigger_disabled_until_completion() {
        let mut menu = EnhanceMenu::new();
        menu.open().unwrap();
        menu.select_action(ActionKind::Improve, CONTENT).unwrap();

        assert_eq!(menu.open().unwrap_err(), MenuError::RequestInFlight);
        // dismiss must not cancel the in-flight state either
        menu.dismiss();
        assert!(menu.is_trigger_disabled());

        menu.complete(
            CONTENT,
            ResultSink::Replace,
            Ok(EnhanceResult {
                text: "done".to_string(),
            }),
        );
        assert_eq!(*menu.state(), MenuState::Closed);
        assert!(menu.open().is_ok());
    }

    #[test]
    fn test_completion_success_replace() {
        let mut menu = EnhanceMenu::new();
        menu.open().unwrap();
        menu.select_action(ActionKind::Improve, CONTENT).unwrap();

        let completion = menu.complete(
            CONTENT,
            ResultSink::Replace,
            Ok(EnhanceResult {
                text: "better text".to_string(),
            }),
        );
        assert_eq!(
            completion,
            Completion::Applied {
                content: "better text".to_string()
            }
        );
    }

    #[test]
    fn test_completion_success_insert_separates_with_blank_line() {
        let mut menu = EnhanceMenu::new();
        menu.open().unwrap();
        menu.select_action(ActionKind::Tags, CONTENT).unwrap();

        let completion = menu.complete(
            CONTENT,
            ResultSink::Insert,
            Ok(EnhanceResult {
                text: "rust, notes, ai".to_string(),
            }),
        );
        assert_eq!(
            completion,
            Completion::Applied {
                content: format!("{}\n\nrust, notes, ai", CONTENT)
            }
        );
    }

    #[test]
    fn test_completion_failure_clears_loading_and_surfaces_message() {
        let mut menu = EnhanceMenu::new();
        menu.open().unwrap();
        menu.select_action(ActionKind::Summarize, CONTENT).unwrap();

        let completion = menu.complete(
            CONTENT,
            ResultSink::Replace,
            Err(EnhanceError::new(
                EnhanceErrorKind::Connectivity,
                "AI service connectivity issue. Please check your internet or try again later.",
                503,
                true,
            )),
        );
        match completion {
            Completion::Failed { message } => {
                assert!(message.contains("connectivity issue"));
            }
            other => panic!("unexpected completion: {:?}", other),
        }
        assert_eq!(*menu.state(), MenuState::Closed);
        assert!(!menu.is_trigger_disabled());
    }

    #[test]
    fn test_select_action_requires_open_menu() {
        let mut menu = EnhanceMenu::new();
        let err = menu.select_action(ActionKind::Summarize, CONTENT).unwrap_err();
        assert_eq!(err, MenuError::NotOpen);
    }

    #[test]
    fn test_dismiss_closes_open_menus() {
        let mut menu = EnhanceMenu::new();
        menu.open().unwrap();
        menu.dismiss();
        assert_eq!(*menu.state(), MenuState::Closed);
    }

    #[test]
    fn test_apply_result_insert_into_empty_body() {
        assert_eq!(apply_result("", ResultSink::Insert, "text"), "text");
    }
}
