//! Note version history repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use notemark_core::{NoteVersion, Result, VersionRepository};

/// PostgreSQL implementation of VersionRepository.
pub struct PgVersionRepository {
    pool: PgPool,
}

impl PgVersionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const VERSION_COLUMNS: &str =
    "id, note_id, title, content, version_number, created_by, created_at";

fn version_from_row(row: &PgRow) -> Result<NoteVersion> {
    Ok(NoteVersion {
        id: row.try_get("id")?,
        note_id: row.try_get("note_id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        version_number: row.try_get("version_number")?,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl VersionRepository for PgVersionRepository {
    async fn create_version(
        &self,
        note_id: Uuid,
        title: &str,
        content: &str,
        created_by: Uuid,
    ) -> Result<NoteVersion> {
        // Read-then-insert inside one transaction so concurrent snapshots of
        // the same note cannot claim the same version number.
        let mut tx = self.pool.begin().await?;

        let latest: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT version_number FROM note_versions
            WHERE note_id = $1
            ORDER BY version_number DESC
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(note_id)
        .fetch_optional(&mut *tx)
        .await?;

        let next_version = latest.map(|v| v + 1).unwrap_or(1);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO note_versions (note_id, title, content, version_number, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            VERSION_COLUMNS
        ))
        .bind(note_id)
        .bind(title)
        .bind(content)
        .bind(next_version)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        version_from_row(&row)
    }

    async fn list_for_note(&self, note_id: Uuid) -> Result<Vec<NoteVersion>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM note_versions
            WHERE note_id = $1
            ORDER BY version_number DESC
            "#,
            VERSION_COLUMNS
        ))
        .bind(note_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(version_from_row).collect()
    }
}
