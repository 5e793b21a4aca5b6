//! Workspace and category repository implementations.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use notemark_core::{
    Category, CreateCategoryRequest, CreateWorkspaceRequest, Error, Result, Workspace,
    WorkspaceRepository, WorkspaceRole,
};

/// Icon assigned to workspaces created without one.
pub const DEFAULT_WORKSPACE_ICON: &str = "📁";

/// Accent color assigned to workspaces created without one.
pub const DEFAULT_WORKSPACE_COLOR: &str = "#6366f1";

/// PostgreSQL implementation of WorkspaceRepository.
pub struct PgWorkspaceRepository {
    pool: PgPool,
}

impl PgWorkspaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const WORKSPACE_COLUMNS: &str =
    "id, name, description, icon, color, owner_id, is_personal, created_at";

fn workspace_from_row(row: &PgRow) -> Result<Workspace> {
    Ok(Workspace {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        icon: row.try_get("icon")?,
        color: row.try_get("color")?,
        owner_id: row.try_get("owner_id")?,
        is_personal: row.try_get("is_personal")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl WorkspaceRepository for PgWorkspaceRepository {
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Workspace>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM workspaces WHERE owner_id = $1 ORDER BY created_at DESC",
            WORKSPACE_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(workspace_from_row).collect()
    }

    async fn create(&self, owner_id: Uuid, req: CreateWorkspaceRequest) -> Result<Workspace> {
        if req.name.trim().is_empty() {
            return Err(Error::validation("name", "Workspace name is required"));
        }

        // Workspace insert and owner membership commit together.
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO workspaces (name, description, icon, color, owner_id, is_personal)
            VALUES ($1, $2, $3, $4, $5, false)
            RETURNING {}
            "#,
            WORKSPACE_COLUMNS
        ))
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.icon.as_deref().unwrap_or(DEFAULT_WORKSPACE_ICON))
        .bind(req.color.as_deref().unwrap_or(DEFAULT_WORKSPACE_COLOR))
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        let workspace = workspace_from_row(&row)?;

        sqlx::query("INSERT INTO workspace_members (workspace_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(workspace.id)
            .bind(owner_id)
            .bind(WorkspaceRole::Owner.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(workspace)
    }

    async fn add_member(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
        role: WorkspaceRole,
    ) -> Result<()> {
        sqlx::query("INSERT INTO workspace_members (workspace_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(workspace_id)
            .bind(user_id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// PostgreSQL implementation of CategoryRepository.
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CATEGORY_COLUMNS: &str =
    "id, workspace_id, name, icon, color, parent_id, position, created_at";

fn category_from_row(row: &PgRow) -> Result<Category> {
    Ok(Category {
        id: row.try_get("id")?,
        workspace_id: row.try_get("workspace_id")?,
        name: row.try_get("name")?,
        icon: row.try_get("icon")?,
        color: row.try_get("color")?,
        parent_id: row.try_get("parent_id")?,
        position: row.try_get("position")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl notemark_core::CategoryRepository for PgCategoryRepository {
    async fn list_for_workspace(&self, workspace_id: Uuid) -> Result<Vec<Category>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM categories
            WHERE workspace_id = $1 AND parent_id IS NULL
            ORDER BY position ASC
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(category_from_row).collect()
    }

    async fn create(&self, workspace_id: Uuid, req: CreateCategoryRequest) -> Result<Category> {
        if req.name.trim().is_empty() {
            return Err(Error::validation("name", "Category name is required"));
        }

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO categories (workspace_id, name, icon, color, parent_id, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(workspace_id)
        .bind(&req.name)
        .bind(&req.icon)
        .bind(&req.color)
        .bind(req.parent_id)
        .bind(req.position.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        category_from_row(&row)
    }
}
