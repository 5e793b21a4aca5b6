//! # notemark-db
//!
//! PostgreSQL database layer for notemark.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for notes, workspaces, categories, and
//!   version history
//! - A session-backed identity provider
//!
//! ## Example
//!
//! ```rust,ignore
//! use notemark_db::Database;
//! use notemark_core::{CreateNoteRequest, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/notemark").await?;
//!
//!     let note = db.notes.create(owner_id, CreateNoteRequest {
//!         title: "Hello".to_string(),
//!         content: Some("world".to_string()),
//!         workspace_id,
//!         category_id: None,
//!     }).await?;
//!
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```

pub mod identity;
pub mod notes;
pub mod pool;
pub mod test_support;
pub mod versioning;
pub mod workspaces;

use std::sync::Arc;

use sqlx::PgPool;

use notemark_core::Result;

pub use identity::PgIdentityProvider;
pub use notes::PgNoteRepository;
pub use pool::{create_pool, PoolConfig};
pub use versioning::PgVersionRepository;
pub use workspaces::{PgCategoryRepository, PgWorkspaceRepository};

/// Aggregate of every repository, sharing one connection pool.
#[derive(Clone)]
pub struct Database {
    pub notes: Arc<PgNoteRepository>,
    pub workspaces: Arc<PgWorkspaceRepository>,
    pub categories: Arc<PgCategoryRepository>,
    pub versions: Arc<PgVersionRepository>,
    pub identity: Arc<PgIdentityProvider>,
    pool: PgPool,
}

impl Database {
    /// Connect with default pool settings.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Self::connect_with(database_url, PoolConfig::default()).await
    }

    /// Connect with explicit pool settings.
    pub async fn connect_with(database_url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool(database_url, config).await?;
        Ok(Self::from_pool(pool))
    }

    /// Build repositories over an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            notes: Arc::new(PgNoteRepository::new(pool.clone())),
            workspaces: Arc::new(PgWorkspaceRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            versions: Arc::new(PgVersionRepository::new(pool.clone())),
            identity: Arc::new(PgIdentityProvider::new(pool.clone())),
            pool,
        }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run embedded migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| notemark_core::Error::Internal(format!("Migration failed: {}", e)))?;
        Ok(())
    }
}
