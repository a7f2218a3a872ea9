//! # quill-db
//!
//! PostgreSQL database layer for quill.
//!
//! This crate provides:
//! - Connection pool management
//! - The note repository implementation
//! - Schema migrations (sqlx migrate)
//!
//! ## Example
//!
//! ```rust,ignore
//! use quill_db::Database;
//! use quill_core::{CreateNoteRequest, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/quill").await?;
//!
//!     let note_id = db
//!         .notes
//!         .insert(CreateNoteRequest::auto_provisioned(user_id))
//!         .await?;
//!
//!     println!("Created note: {}", note_id);
//!     Ok(())
//! }
//! ```

pub mod notes;
pub mod pool;

use std::sync::Arc;

use sqlx::postgres::PgPool;

use quill_core::Result;

pub use notes::PgNoteRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};

/// Bundled database handle: pool plus repositories.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    /// Note repository.
    pub notes: Arc<PgNoteRepository>,
}

impl Database {
    /// Connect with the default pool configuration and run pending
    /// migrations.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| quill_core::Error::Internal(format!("migration failed: {}", e)))?;

        Ok(Self::from_pool(pool))
    }

    /// Build a Database from an existing pool. Does not run migrations.
    pub fn from_pool(pool: PgPool) -> Self {
        let notes = Arc::new(PgNoteRepository::new(pool.clone()));
        Self { pool, notes }
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
