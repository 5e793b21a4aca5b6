//! Note repository implementation.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use notemark_core::{
    CreateNoteRequest, Error, ListNotesRequest, Note, NoteRepository, Result, SortOrder,
    UpdateNoteRequest,
};

/// Minimum search query length; shorter queries return an empty list.
pub const MIN_SEARCH_QUERY_CHARS: usize = 2;

/// Maximum number of search results.
pub const SEARCH_RESULT_LIMIT: i64 = 20;

/// PostgreSQL implementation of NoteRepository.
pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const NOTE_COLUMNS: &str =
    "id, title, content, workspace_id, category_id, created_by, is_archived, created_at, updated_at";

fn note_from_row(row: &PgRow) -> Result<Note> {
    Ok(Note {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        workspace_id: row.try_get("workspace_id")?,
        category_id: row.try_get("category_id")?,
        created_by: row.try_get("created_by")?,
        is_archived: row.try_get("is_archived")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn get(&self, id: Uuid) -> Result<Note> {
        let row = sqlx::query(&format!("SELECT {} FROM notes WHERE id = $1", NOTE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::NoteNotFound(id))?;

        note_from_row(&row)
    }

    async fn create(&self, owner_id: Uuid, req: CreateNoteRequest) -> Result<Note> {
        if req.title.trim().is_empty() {
            return Err(Error::validation("title", "Title is required"));
        }

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO notes (title, content, workspace_id, category_id, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            NOTE_COLUMNS
        ))
        .bind(&req.title)
        .bind(req.content.unwrap_or_default())
        .bind(req.workspace_id)
        .bind(req.category_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        note_from_row(&row)
    }

    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE notes SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                category_id = COALESCE($4, category_id),
                is_archived = COALESCE($5, is_archived),
                updated_at = now()
            WHERE id = $1
            RETURNING {}
            "#,
            NOTE_COLUMNS
        ))
        .bind(id)
        .bind(req.title)
        .bind(req.content)
        .bind(req.category_id)
        .bind(req.is_archived)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NoteNotFound(id))?;

        note_from_row(&row)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }

    async fn list(&self, owner_id: Uuid, req: ListNotesRequest) -> Result<Vec<Note>> {
        let mut query = format!(
            "SELECT {} FROM notes WHERE created_by = $1 ",
            NOTE_COLUMNS
        );
        let mut param_idx = 2;

        if req.workspace_id.is_some() {
            query.push_str(&format!("AND workspace_id = ${} ", param_idx));
            param_idx += 1;
        }
        if req.category_id.is_some() {
            query.push_str(&format!("AND category_id = ${} ", param_idx));
            param_idx += 1;
        }
        if req.archived.is_some() {
            query.push_str(&format!("AND is_archived = ${} ", param_idx));
            param_idx += 1;
        }

        let order = match req.order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        query.push_str(&format!("ORDER BY updated_at {} ", order));

        if req.limit.is_some() {
            query.push_str(&format!("LIMIT ${}", param_idx));
        }

        let mut q = sqlx::query(&query).bind(owner_id);
        if let Some(workspace_id) = req.workspace_id {
            q = q.bind(workspace_id);
        }
        if let Some(category_id) = req.category_id {
            q = q.bind(category_id);
        }
        if let Some(archived) = req.archived {
            q = q.bind(archived);
        }
        if let Some(limit) = req.limit {
            q = q.bind(limit);
        }

        let rows = q.fetch_all(&self.pool).await?;
        rows.iter().map(note_from_row).collect()
    }

    async fn search(&self, owner_id: Uuid, query: &str) -> Result<Vec<Note>> {
        if query.trim().chars().count() < MIN_SEARCH_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let pattern = format!("%{}%", escape_like(query.trim()));
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM notes
            WHERE created_by = $1
              AND is_archived = false
              AND (title ILIKE $2 OR content ILIKE $2)
            ORDER BY updated_at DESC
            LIMIT $3
            "#,
            NOTE_COLUMNS
        ))
        .bind(owner_id)
        .bind(pattern)
        .bind(SEARCH_RESULT_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(note_from_row).collect()
    }

    async fn count(&self, owner_id: Uuid, workspace_id: Option<Uuid>) -> Result<i64> {
        let count: i64 = match workspace_id {
            Some(workspace_id) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM notes WHERE created_by = $1 AND workspace_id = $2",
                )
                .bind(owner_id)
                .bind(workspace_id)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE created_by = $1")
                    .bind(owner_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }
}
