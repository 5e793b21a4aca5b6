//! Note change events and the broadcast bus behind the realtime feed.
//!
//! API mutation handlers emit a [`NoteChange`] after every successful write;
//! UI stores subscribe and replay full rows into their local state. The
//! enhancement pipeline itself does not depend on this feed.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::Note;

/// Default broadcast channel capacity. Slow consumers past this depth see
/// `RecvError::Lagged` and should refetch.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// A change to the notes table, carrying the full row for inserts and
/// updates (whole-object replacement on the consumer side).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoteChange {
    Inserted { note: Note },
    Updated { note: Note },
    Deleted { id: Uuid },
}

impl NoteChange {
    /// Owner the change belongs to; `None` for deletes, which carry only
    /// the row id.
    pub fn owner_id(&self) -> Option<Uuid> {
        match self {
            NoteChange::Inserted { note } | NoteChange::Updated { note } => Some(note.created_by),
            NoteChange::Deleted { .. } => None,
        }
    }
}

/// Broadcast bus for note changes. Cloning is cheap; all clones share the
/// same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<NoteChange>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit a change. Send failures mean no subscriber is listening, which
    /// is normal at startup and not an error.
    pub fn emit(&self, change: NoteChange) {
        let _ = self.tx.send(change);
    }

    /// Subscribe to changes emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<NoteChange> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_note() -> Note {
        Note {
            id: Uuid::new_v4(),
            title: "title".to_string(),
            content: "content".to_string(),
            workspace_id: Uuid::new_v4(),
            category_id: None,
            created_by: Uuid::new_v4(),
            is_archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_subscriber_receives_emitted_change() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let note = sample_note();
        bus.emit(NoteChange::Inserted { note: note.clone() });

        match rx.recv().await.unwrap() {
            NoteChange::Inserted { note: received } => assert_eq!(received.id, note.id),
            other => panic!("unexpected change: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_is_ok() {
        let bus = EventBus::default();
        bus.emit(NoteChange::Deleted { id: Uuid::new_v4() });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_owner_id_for_each_variant() {
        let note = sample_note();
        let owner = note.created_by;
        assert_eq!(
            NoteChange::Inserted { note: note.clone() }.owner_id(),
            Some(owner)
        );
        assert_eq!(NoteChange::Updated { note }.owner_id(), Some(owner));
        assert_eq!(NoteChange::Deleted { id: Uuid::new_v4() }.owner_id(), None);
    }

    #[test]
    fn test_change_serializes_with_type_tag() {
        let json = serde_json::to_value(NoteChange::Deleted { id: Uuid::nil() }).unwrap();
        assert_eq!(json["type"], "deleted");
    }
}
