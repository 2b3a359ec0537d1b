/// LogContent model and database operations
///
/// A log content is one dated entry under a log head, written by exactly one
/// account. Entries disappear automatically when their head is deleted (FK
/// cascade); the writer reference is cleaned up by the account cascade in
/// [`Account::delete_with_cascade`](crate::models::account::Account::delete_with_cascade).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE log_contents (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     log_head_id UUID NOT NULL REFERENCES log_heads(id) ON DELETE CASCADE,
///     writer_id UUID NOT NULL REFERENCES accounts(id),
///     content TEXT NOT NULL,
///     entry_date TIMESTAMPTZ NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// LogContent model representing a single dated entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LogContent {
    /// Unique entry ID (UUID v4)
    pub id: Uuid,

    /// The log head this entry belongs to
    pub log_head_id: Uuid,

    /// The account that wrote this entry
    pub writer_id: Uuid,

    /// Entry text
    pub content: String,

    /// The day the entry is about
    pub entry_date: DateTime<Utc>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new log content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLogContent {
    pub log_head_id: Uuid,
    pub writer_id: Uuid,
    pub content: String,
    pub entry_date: DateTime<Utc>,
}

/// Input for updating an existing log content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLogContent {
    pub content: Option<String>,
    pub entry_date: Option<DateTime<Utc>>,
}

impl LogContent {
    /// Creates a new entry
    ///
    /// Write permission must already have been checked against the head's
    /// policy; this only enforces referential integrity.
    ///
    /// # Errors
    ///
    /// Returns an error if `log_head_id` or `writer_id` does not reference an
    /// existing row (foreign key violation) or the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateLogContent) -> Result<Self, sqlx::Error> {
        let entry = sqlx::query_as::<_, LogContent>(
            r#"
            INSERT INTO log_contents (log_head_id, writer_id, content, entry_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, log_head_id, writer_id, content, entry_date,
                      created_at, updated_at
            "#,
        )
        .bind(data.log_head_id)
        .bind(data.writer_id)
        .bind(data.content)
        .bind(data.entry_date)
        .fetch_one(pool)
        .await?;

        Ok(entry)
    }

    /// Finds an entry by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let entry = sqlx::query_as::<_, LogContent>(
            r#"
            SELECT id, log_head_id, writer_id, content, entry_date,
                   created_at, updated_at
            FROM log_contents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(entry)
    }

    /// Lists all entries of one log head, oldest entry date first
    pub async fn list_by_head(pool: &PgPool, log_head_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let entries = sqlx::query_as::<_, LogContent>(
            r#"
            SELECT id, log_head_id, writer_id, content, entry_date,
                   created_at, updated_at
            FROM log_contents
            WHERE log_head_id = $1
            ORDER BY entry_date ASC
            "#,
        )
        .bind(log_head_id)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    /// Updates an entry's text and/or date
    ///
    /// Returns None if the entry doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateLogContent,
    ) -> Result<Option<Self>, sqlx::Error> {
        let entry = sqlx::query_as::<_, LogContent>(
            r#"
            UPDATE log_contents
            SET content = COALESCE($2, content),
                entry_date = COALESCE($3, entry_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, log_head_id, writer_id, content, entry_date,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.content)
        .bind(data.entry_date)
        .fetch_optional(pool)
        .await?;

        Ok(entry)
    }

    /// Deletes an entry by ID
    ///
    /// Returns true if an entry was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM log_contents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts the entries under one log head
    pub async fn count_by_head(pool: &PgPool, log_head_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM log_contents WHERE log_head_id = $1")
                .bind(log_head_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
