//! In-memory repository implementations for tests.
//!
//! These satisfy the same `notemark-core` traits as the PostgreSQL
//! repositories, with the same observable semantics (ordering, filters,
//! search caps), so API tests can run without a live database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use notemark_core::{
    Category, CategoryRepository, CreateCategoryRequest, CreateNoteRequest,
    CreateWorkspaceRequest, Error, IdentityProvider, ListNotesRequest, Note, NoteRepository,
    NoteVersion, Profile, Result, Session, SortOrder, UpdateNoteRequest, VersionRepository,
    Workspace, WorkspaceRepository, WorkspaceRole,
};

use crate::notes::{MIN_SEARCH_QUERY_CHARS, SEARCH_RESULT_LIMIT};
use crate::workspaces::{DEFAULT_WORKSPACE_COLOR, DEFAULT_WORKSPACE_ICON};

/// In-memory NoteRepository.
#[derive(Default)]
pub struct MemoryNoteRepository {
    notes: Mutex<HashMap<Uuid, Note>>,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a note directly, bypassing create-time defaults.
    pub fn insert_raw(&self, note: Note) {
        self.notes.lock().unwrap().insert(note.id, note);
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn get(&self, id: Uuid) -> Result<Note> {
        self.notes
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(Error::NoteNotFound(id))
    }

    async fn create(&self, owner_id: Uuid, req: CreateNoteRequest) -> Result<Note> {
        if req.title.trim().is_empty() {
            return Err(Error::validation("title", "Title is required"));
        }
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            title: req.title,
            content: req.content.unwrap_or_default(),
            workspace_id: req.workspace_id,
            category_id: req.category_id,
            created_by: owner_id,
            is_archived: false,
            created_at: now,
            updated_at: now,
        };
        self.notes.lock().unwrap().insert(note.id, note.clone());
        Ok(note)
    }

    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        let mut notes = self.notes.lock().unwrap();
        let note = notes.get_mut(&id).ok_or(Error::NoteNotFound(id))?;
        if let Some(title) = req.title {
            note.title = title;
        }
        if let Some(content) = req.content {
            note.content = content;
        }
        if let Some(category_id) = req.category_id {
            note.category_id = Some(category_id);
        }
        if let Some(is_archived) = req.is_archived {
            note.is_archived = is_archived;
        }
        note.updated_at = Utc::now();
        Ok(note.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.notes
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::NoteNotFound(id))
    }

    async fn list(&self, owner_id: Uuid, req: ListNotesRequest) -> Result<Vec<Note>> {
        let notes = self.notes.lock().unwrap();
        let mut result: Vec<Note> = notes
            .values()
            .filter(|n| n.created_by == owner_id)
            .filter(|n| req.workspace_id.map_or(true, |w| n.workspace_id == w))
            .filter(|n| req.category_id.map_or(true, |c| n.category_id == Some(c)))
            .filter(|n| req.archived.map_or(true, |a| n.is_archived == a))
            .cloned()
            .collect();

        result.sort_by_key(|n| n.updated_at);
        if req.order == SortOrder::Desc {
            result.reverse();
        }
        if let Some(limit) = req.limit {
            result.truncate(limit.max(0) as usize);
        }
        Ok(result)
    }

    async fn search(&self, owner_id: Uuid, query: &str) -> Result<Vec<Note>> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_QUERY_CHARS {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();

        let notes = self.notes.lock().unwrap();
        let mut result: Vec<Note> = notes
            .values()
            .filter(|n| n.created_by == owner_id && !n.is_archived)
            .filter(|n| {
                n.title.to_lowercase().contains(&needle)
                    || n.content.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        result.sort_by_key(|n| n.updated_at);
        result.reverse();
        result.truncate(SEARCH_RESULT_LIMIT as usize);
        Ok(result)
    }

    async fn count(&self, owner_id: Uuid, workspace_id: Option<Uuid>) -> Result<i64> {
        let notes = self.notes.lock().unwrap();
        let count = notes
            .values()
            .filter(|n| n.created_by == owner_id)
            .filter(|n| workspace_id.map_or(true, |w| n.workspace_id == w))
            .count();
        Ok(count as i64)
    }
}

/// In-memory WorkspaceRepository.
#[derive(Default)]
pub struct MemoryWorkspaceRepository {
    workspaces: Mutex<Vec<Workspace>>,
    members: Mutex<Vec<(Uuid, Uuid, WorkspaceRole)>>,
}

impl MemoryWorkspaceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership rows recorded so far, for assertions.
    pub fn members(&self) -> Vec<(Uuid, Uuid, WorkspaceRole)> {
        self.members.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkspaceRepository for MemoryWorkspaceRepository {
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Workspace>> {
        let workspaces = self.workspaces.lock().unwrap();
        let mut result: Vec<Workspace> = workspaces
            .iter()
            .filter(|w| w.owner_id == owner_id)
            .cloned()
            .collect();
        result.sort_by_key(|w| w.created_at);
        result.reverse();
        Ok(result)
    }

    async fn create(&self, owner_id: Uuid, req: CreateWorkspaceRequest) -> Result<Workspace> {
        if req.name.trim().is_empty() {
            return Err(Error::validation("name", "Workspace name is required"));
        }
        let workspace = Workspace {
            id: Uuid::new_v4(),
            name: req.name,
            description: req.description,
            icon: req.icon.unwrap_or_else(|| DEFAULT_WORKSPACE_ICON.to_string()),
            color: req.color.unwrap_or_else(|| DEFAULT_WORKSPACE_COLOR.to_string()),
            owner_id,
            is_personal: false,
            created_at: Utc::now(),
        };
        self.workspaces.lock().unwrap().push(workspace.clone());
        self.members
            .lock()
            .unwrap()
            .push((workspace.id, owner_id, WorkspaceRole::Owner));
        Ok(workspace)
    }

    async fn add_member(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
        role: WorkspaceRole,
    ) -> Result<()> {
        self.members.lock().unwrap().push((workspace_id, user_id, role));
        Ok(())
    }
}

/// In-memory CategoryRepository.
#[derive(Default)]
pub struct MemoryCategoryRepository {
    categories: Mutex<Vec<Category>>,
}

impl MemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn list_for_workspace(&self, workspace_id: Uuid) -> Result<Vec<Category>> {
        let categories = self.categories.lock().unwrap();
        let mut result: Vec<Category> = categories
            .iter()
            .filter(|c| c.workspace_id == workspace_id && c.parent_id.is_none())
            .cloned()
            .collect();
        result.sort_by_key(|c| c.position);
        Ok(result)
    }

    async fn create(&self, workspace_id: Uuid, req: CreateCategoryRequest) -> Result<Category> {
        if req.name.trim().is_empty() {
            return Err(Error::validation("name", "Category name is required"));
        }
        let category = Category {
            id: Uuid::new_v4(),
            workspace_id,
            name: req.name,
            icon: req.icon,
            color: req.color,
            parent_id: req.parent_id,
            position: req.position.unwrap_or(0),
            created_at: Utc::now(),
        };
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }
}

/// In-memory VersionRepository.
#[derive(Default)]
pub struct MemoryVersionRepository {
    versions: Mutex<Vec<NoteVersion>>,
}

impl MemoryVersionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VersionRepository for MemoryVersionRepository {
    async fn create_version(
        &self,
        note_id: Uuid,
        title: &str,
        content: &str,
        created_by: Uuid,
    ) -> Result<NoteVersion> {
        let mut versions = self.versions.lock().unwrap();
        let next_version = versions
            .iter()
            .filter(|v| v.note_id == note_id)
            .map(|v| v.version_number)
            .max()
            .map(|v| v + 1)
            .unwrap_or(1);

        let version = NoteVersion {
            id: Uuid::new_v4(),
            note_id,
            title: title.to_string(),
            content: content.to_string(),
            version_number: next_version,
            created_by,
            created_at: Utc::now(),
        };
        versions.push(version.clone());
        Ok(version)
    }

    async fn list_for_note(&self, note_id: Uuid) -> Result<Vec<NoteVersion>> {
        let versions = self.versions.lock().unwrap();
        let mut result: Vec<NoteVersion> = versions
            .iter()
            .filter(|v| v.note_id == note_id)
            .cloned()
            .collect();
        result.sort_by_key(|v| std::cmp::Reverse(v.version_number));
        Ok(result)
    }
}

/// In-memory IdentityProvider with pre-registered tokens and codes.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    sessions: Mutex<HashMap<String, Profile>>,
    codes: Mutex<HashMap<String, Profile>>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a live session for `token`.
    pub fn with_user(self, token: impl Into<String>, profile: Profile) -> Self {
        self.sessions.lock().unwrap().insert(token.into(), profile);
        self
    }

    /// Register a one-time authorization code for `profile`.
    pub fn with_code(self, code: impl Into<String>, profile: Profile) -> Self {
        self.codes.lock().unwrap().insert(code.into(), profile);
        self
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn get_current_user(&self, token: &str) -> Result<Option<Profile>> {
        Ok(self.sessions.lock().unwrap().get(token).cloned())
    }

    async fn exchange_authorization_code(&self, code: &str) -> Result<Session> {
        let profile = self
            .codes
            .lock()
            .unwrap()
            .remove(code)
            .ok_or_else(|| Error::Unauthorized("Invalid authorization code".to_string()))?;

        let token = Uuid::new_v4().simple().to_string();
        let session = Session {
            token: token.clone(),
            user_id: profile.id,
            expires_at: Utc::now() + Duration::hours(24),
        };
        self.sessions.lock().unwrap().insert(token, profile);
        Ok(session)
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }
}
