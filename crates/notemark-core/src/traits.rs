//! Core traits for notemark abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Repository for note CRUD operations. All queries are scoped to the
/// requesting owner; there is no finer-grained ACL.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Fetch a note by ID.
    async fn get(&self, id: Uuid) -> Result<Note>;

    /// Create a new note owned by `owner_id`.
    async fn create(&self, owner_id: Uuid, req: CreateNoteRequest) -> Result<Note>;

    /// Apply a partial update and bump `updated_at`.
    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note>;

    /// Permanently delete a note.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// List an owner's notes with equality filters and timestamp ordering.
    async fn list(&self, owner_id: Uuid, req: ListNotesRequest) -> Result<Vec<Note>>;

    /// Substring search over title and content (case-insensitive).
    ///
    /// Queries shorter than 2 characters return an empty list; results are
    /// capped at 20, most recently updated first, archived notes excluded.
    async fn search(&self, owner_id: Uuid, query: &str) -> Result<Vec<Note>>;

    /// Count an owner's notes, optionally scoped to one workspace.
    async fn count(&self, owner_id: Uuid, workspace_id: Option<Uuid>) -> Result<i64>;
}

// =============================================================================
// WORKSPACE / CATEGORY REPOSITORY TRAITS
// =============================================================================

/// Repository for workspace operations.
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// List workspaces owned by a user, newest first.
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Workspace>>;

    /// Create a workspace and enroll the owner as a member with role owner.
    async fn create(&self, owner_id: Uuid, req: CreateWorkspaceRequest) -> Result<Workspace>;

    /// Add a member to a workspace.
    async fn add_member(&self, workspace_id: Uuid, user_id: Uuid, role: WorkspaceRole)
        -> Result<()>;
}

/// Repository for category operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List top-level categories of a workspace, ordered by position.
    async fn list_for_workspace(&self, workspace_id: Uuid) -> Result<Vec<Category>>;

    /// Create a category inside a workspace.
    async fn create(&self, workspace_id: Uuid, req: CreateCategoryRequest) -> Result<Category>;
}

// =============================================================================
// VERSION REPOSITORY TRAITS
// =============================================================================

/// Repository for note version history.
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Snapshot a note's title and content as the next version.
    ///
    /// Reads the latest version number for the note and inserts with +1
    /// (starting at 1 for the first snapshot).
    async fn create_version(
        &self,
        note_id: Uuid,
        title: &str,
        content: &str,
        created_by: Uuid,
    ) -> Result<NoteVersion>;

    /// List all versions of a note, newest first.
    async fn list_for_note(&self, note_id: Uuid) -> Result<Vec<NoteVersion>>;
}

// =============================================================================
// IDENTITY TRAITS
// =============================================================================

/// Identity collaborator: session issuance and user lookup.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token to its user, if the session is live.
    async fn get_current_user(&self, token: &str) -> Result<Option<Profile>>;

    /// Exchange a one-time authorization code for a session.
    async fn exchange_authorization_code(&self, code: &str) -> Result<Session>;

    /// Revoke the session behind a token. Revoking an unknown token is a
    /// no-op.
    async fn sign_out(&self, token: &str) -> Result<()>;
}

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Backend for text generation (LLM).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt. One outbound call, no retries.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
