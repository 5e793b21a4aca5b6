//! Note CRUD, search, and version history endpoints.
//!
//! Every route requires a bearer session and is scoped to the resolved
//! owner; notes belonging to someone else read as not found.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use notemark_core::{
    CreateNoteRequest, ListNotesRequest, Note, NoteChange, NoteVersion, Profile,
    UpdateNoteRequest,
};

use crate::{require_user, ApiError, AppState};

/// Fetch a note and hide it unless the caller owns it.
async fn owned_note(state: &AppState, user: &Profile, id: Uuid) -> Result<Note, ApiError> {
    let note = state.notes.get(id).await?;
    if note.created_by != user.id {
        return Err(ApiError::NotFound(format!("Note not found: {}", id)));
    }
    Ok(note)
}

pub async fn list_notes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<ListNotesRequest>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let notes = state.notes.list(user.id, req).await?;
    Ok(Json(notes))
}

pub async fn create_note(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let note = state.notes.create(user.id, req).await?;
    state
        .event_bus
        .emit(NoteChange::Inserted { note: note.clone() });
    Ok(Json(note))
}

pub async fn get_note(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let note = owned_note(&state, &user, id).await?;
    Ok(Json(note))
}

pub async fn update_note(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    let user = require_user(&state, &headers).await?;
    owned_note(&state, &user, id).await?;

    let note = state.notes.update(id, req).await?;
    state
        .event_bus
        .emit(NoteChange::Updated { note: note.clone() });
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = require_user(&state, &headers).await?;
    owned_note(&state, &user, id).await?;

    state.notes.delete(id).await?;
    state.event_bus.emit(NoteChange::Deleted { id });
    Ok(Json(serde_json::json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

pub async fn search_notes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let notes = state.notes.search(user.id, &params.q).await?;
    Ok(Json(notes))
}

#[derive(Debug, Deserialize)]
pub struct CountParams {
    pub workspace_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

pub async fn count_notes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CountParams>,
) -> Result<Json<CountResponse>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let count = state.notes.count(user.id, params.workspace_id).await?;
    Ok(Json(CountResponse { count }))
}

pub async fn list_versions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<NoteVersion>>, ApiError> {
    let user = require_user(&state, &headers).await?;
    owned_note(&state, &user, id).await?;

    let versions = state.versions.list_for_note(id).await?;
    Ok(Json(versions))
}

/// Snapshot the note's current title and content as the next version.
pub async fn create_version(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<NoteVersion>, ApiError> {
    let user = require_user(&state, &headers).await?;
    let note = owned_note(&state, &user, id).await?;

    let version = state
        .versions
        .create_version(note.id, &note.title, &note.content, user.id)
        .await?;
    Ok(Json(version))
}
