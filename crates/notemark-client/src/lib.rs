//! # notemark-client
//!
//! UI-side state for notemark, kept free of any rendering concerns:
//!
//! - [`EnhanceMenu`] — the enhance menu state machine (action selection,
//!   translate language submenu, loading/disabled states, result routing)
//! - [`NoteStore`] — the in-memory note list, fed by the realtime change
//!   feed
//! - [`Autosave`] — debounced flushing of local edits to the persistence
//!   collaborator

pub mod autosave;
pub mod menu;
pub mod store;

pub use autosave::{Autosave, PendingEdit, SaveSink, DEFAULT_AUTOSAVE_DELAY_SECS};
pub use menu::{
    apply_result, Completion, EnhanceMenu, MenuError, MenuState, ResultSink, SelectOutcome,
    LANGUAGES,
};
pub use store::NoteStore;
