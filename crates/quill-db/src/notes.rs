//! Note repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use quill_core::{CreateNoteRequest, Error, Note, NoteRepository, NoteSummary, Result};

/// PostgreSQL implementation of NoteRepository.
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Map a database row to a NoteSummary.
fn map_row_to_summary(row: sqlx::postgres::PgRow) -> NoteSummary {
    let title: String = row.get("title");
    let content: String = row.get("content");
    let title = if title.trim().is_empty() {
        content
            .lines()
            .find(|l| !l.trim().is_empty())
            .map(|l| l.trim().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    } else {
        title
    };

    NoteSummary {
        id: row.get("id"),
        title,
        content,
        created_at_utc: row.get("created_at_utc"),
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, req: CreateNoteRequest) -> Result<Uuid> {
        let id = Uuid::now_v7();
        sqlx::query(
            r#"
            INSERT INTO note (id, title, content, author_id, created_at_utc)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.content)
        .bind(req.author_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content, author_id, created_at_utc
            FROM note
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))?;

        Ok(Note {
            id: row.get("id"),
            title: row.get("title"),
            content: row.get("content"),
            author_id: row.get("author_id"),
            created_at_utc: row.get("created_at_utc"),
        })
    }

    async fn latest_for_author(&self, author_id: Uuid) -> Result<Option<NoteSummary>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content, created_at_utc
            FROM note
            WHERE author_id = $1
            ORDER BY created_at_utc DESC
            LIMIT 1
            "#,
        )
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(map_row_to_summary))
    }

    async fn list_for_author(&self, author_id: Uuid) -> Result<Vec<NoteSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, created_at_utc
            FROM note
            WHERE author_id = $1
            ORDER BY created_at_utc DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_row_to_summary).collect())
    }

    async fn delete_owned(&self, id: Uuid, author_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM note
            WHERE id = $1 AND author_id = $2
            "#,
        )
        .bind(id)
        .bind(author_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
