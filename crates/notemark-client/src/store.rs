//! In-memory note store.
//!
//! A single owned container behind methods; components read a consistent
//! view and never mutate it directly. Updates are whole-object replacement
//! keyed by note id, which is race-safe here because all writes happen on
//! one thread of control.

use uuid::Uuid;

use notemark_core::{Note, NoteChange};

/// The UI's current view of the note list.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    active_note_id: Option<Uuid>,
    is_loading: bool,
    error: Option<String>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn active_note_id(&self) -> Option<Uuid> {
        self.active_note_id
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.active_note_id
            .and_then(|id| self.notes.iter().find(|n| n.id == id))
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the whole list (initial fetch, refetch after lag).
    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Prepend a new note and make it active.
    pub fn add_note(&mut self, note: Note) {
        self.active_note_id = Some(note.id);
        self.notes.insert(0, note);
    }

    /// Replace the note with the same id; unknown ids are ignored.
    pub fn update_note(&mut self, note: Note) {
        if let Some(existing) = self.notes.iter_mut().find(|n| n.id == note.id) {
            *existing = note;
        }
    }

    /// Remove a note, clearing the active id if it pointed at it.
    pub fn delete_note(&mut self, id: Uuid) {
        self.notes.retain(|n| n.id != id);
        if self.active_note_id == Some(id) {
            self.active_note_id = None;
        }
    }

    pub fn set_active_note_id(&mut self, id: Option<Uuid>) {
        self.active_note_id = id;
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Replay one realtime change into the store.
    pub fn apply(&mut self, change: NoteChange) {
        match change {
            NoteChange::Inserted { note } => self.add_note(note),
            NoteChange::Updated { note } => self.update_note(note),
            NoteChange::Deleted { id } => self.delete_note(id),
        }
    }
}
