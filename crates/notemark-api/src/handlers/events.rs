//! Realtime note change feed over Server-Sent Events.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use futures::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use crate::AppState;

/// `GET /api/events`
///
/// Streams every note change as a `note.change` SSE event with the full
/// row as JSON. A consumer that lags past the channel capacity misses
/// events silently and should refetch the list.
pub async fn subscribe(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.event_bus.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|change| async move {
        let change = change.ok()?;
        let data = serde_json::to_string(&change).ok()?;
        Some(Ok::<_, Infallible>(
            Event::default().event("note.change").data(data),
        ))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
