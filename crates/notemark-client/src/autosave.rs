//! Debounced autosave.
//!
//! Edits restart a fixed quiescence window; overlapping windows coalesce to
//! a single pending save, so only the newest snapshot reaches the sink.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::warn;
use uuid::Uuid;

use notemark_core::Result;

/// Default quiescence window before a pending edit is flushed.
pub const DEFAULT_AUTOSAVE_DELAY_SECS: u64 = 3;

/// Destination of a flushed snapshot (the persistence collaborator's
/// update call, plus version snapshotting where the caller wants it).
#[async_trait]
pub trait SaveSink: Send + Sync {
    async fn save(&self, note_id: Uuid, title: String, content: String) -> Result<()>;
}

/// A pending, not-yet-flushed edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub note_id: Uuid,
    pub title: String,
    pub content: String,
}

/// Debounced autosave over a [`SaveSink`].
pub struct Autosave {
    delay: Duration,
    sink: Arc<dyn SaveSink>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Autosave {
    pub fn new(delay: Duration, sink: Arc<dyn SaveSink>) -> Self {
        Self {
            delay,
            sink,
            pending: Mutex::new(None),
        }
    }

    /// Autosave with the default quiescence window.
    pub fn with_default_delay(sink: Arc<dyn SaveSink>) -> Self {
        Self::new(Duration::from_secs(DEFAULT_AUTOSAVE_DELAY_SECS), sink)
    }

    /// Record an edit. Any pending save is cancelled and replaced; the sink
    /// sees only the newest snapshot once the window elapses.
    ///
    /// Sink failures are logged, not surfaced: the next edit retries with
    /// newer content anyway.
    pub fn record_edit(&self, edit: PendingEdit) {
        let mut pending = self.pending.lock().expect("autosave lock poisoned");
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let sink = Arc::clone(&self.sink);
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = sink
                .save(edit.note_id, edit.title, edit.content)
                .await
            {
                warn!(note_id = %edit.note_id, error = %err, "Autosave failed");
            }
        }));
    }

    /// True while an edit is waiting out its quiescence window.
    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .expect("autosave lock poisoned")
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Drop any pending save without flushing it.
    pub fn cancel(&self) {
        if let Some(handle) = self
            .pending
            .lock()
            .expect("autosave lock poisoned")
            .take()
        {
            handle.abort();
        }
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        self.cancel();
    }
}
