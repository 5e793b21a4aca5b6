//! Core data models for notemark.
//!
//! These types are shared across all notemark crates and represent
//! the core domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// USER / IDENTITY TYPES
// =============================================================================

/// An authenticated user's profile row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An issued session: opaque bearer token plus expiry.
///
/// The raw token is only ever returned once, at issuance; storage keeps a
/// SHA-256 hash.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

// =============================================================================
// WORKSPACE TYPES
// =============================================================================

/// A named container that scopes notes and categories to an owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
    pub owner_id: Uuid,
    pub is_personal: bool,
    pub created_at: DateTime<Utc>,
}

/// Membership role inside a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceRole {
    Owner,
    Member,
}

impl WorkspaceRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceRole::Owner => "owner",
            WorkspaceRole::Member => "member",
        }
    }
}

/// Request for creating a workspace. Name is required; icon and color fall
/// back to the app defaults when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

// =============================================================================
// CATEGORY TYPES
// =============================================================================

/// A category inside a workspace. Categories may nest via `parent_id`;
/// listing only returns top-level rows, ordered by `position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Request for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub position: Option<i32>,
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A full note row. The enhancement pipeline only ever reads `content` and
/// writes back a full replacement string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub workspace_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    pub created_by: Uuid,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request for creating a new note.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub workspace_id: Uuid,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

/// Partial update of a note. Absent fields are left untouched; every
/// successful update bumps `updated_at`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub is_archived: Option<bool>,
}

/// Sort order for note listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Request for listing notes scoped to an owner and workspace.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListNotesRequest {
    pub workspace_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    /// Equality filter on the archived flag; None returns both.
    pub archived: Option<bool>,
    /// Ordering by `updated_at`.
    #[serde(default)]
    pub order: SortOrder,
    pub limit: Option<i64>,
}

// =============================================================================
// VERSION TYPES
// =============================================================================

/// A point-in-time snapshot of a note's title and content.
///
/// Version numbers are per-note, monotonically increasing from 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteVersion {
    pub id: Uuid,
    pub note_id: Uuid,
    pub title: String,
    pub content: String,
    pub version_number: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_role_as_str() {
        assert_eq!(WorkspaceRole::Owner.as_str(), "owner");
        assert_eq!(WorkspaceRole::Member.as_str(), "member");
    }

    #[test]
    fn test_sort_order_default_is_desc() {
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }

    #[test]
    fn test_update_note_request_default_is_empty() {
        let req = UpdateNoteRequest::default();
        assert!(req.title.is_none());
        assert!(req.content.is_none());
        assert!(req.category_id.is_none());
        assert!(req.is_archived.is_none());
    }

    #[test]
    fn test_list_notes_request_deserializes_order() {
        let req: ListNotesRequest = serde_json::from_str(r#"{"order":"asc"}"#).unwrap();
        assert_eq!(req.order, SortOrder::Asc);
    }
}
