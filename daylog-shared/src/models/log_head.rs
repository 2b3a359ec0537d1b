/// LogHead model and database operations
///
/// A log head is a diary subject: it has an owner, a date range, and a write
/// policy deciding which accounts may append entries. The policy is a tagged
/// variant rather than loose string comparisons; it is persisted as a scope
/// discriminant column plus a UUID array that is only meaningful for the
/// explicit-list variant.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE write_scope AS ENUM ('allow_all', 'owner_only', 'explicit_list');
///
/// CREATE TABLE log_heads (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     subject VARCHAR(255) NOT NULL,
///     start_date TIMESTAMPTZ NOT NULL,
///     end_date TIMESTAMPTZ NOT NULL,
///     owner_id UUID NOT NULL REFERENCES accounts(id),
///     write_scope write_scope NOT NULL DEFAULT 'explicit_list',
///     writer_ids UUID[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

/// Discriminant of a [`WritePolicy`], as stored in the `write_scope` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "write_scope", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WriteScope {
    AllowAll,
    OwnerOnly,
    ExplicitList,
}

/// Write-permission policy of a log head
///
/// - `AllowAll`: every member may append entries
/// - `OwnerOnly`: only the head's owner may append entries
/// - `ExplicitList`: only the listed account IDs may append entries; an empty
///   list means administrators only, since admins bypass the policy
///
/// Serializes as `{"scope": "explicit_list", "writer_ids": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "writer_ids", rename_all = "snake_case")]
pub enum WritePolicy {
    AllowAll,
    OwnerOnly,
    ExplicitList(Vec<Uuid>),
}

impl WritePolicy {
    /// The discriminant stored in the `write_scope` column
    pub fn scope(&self) -> WriteScope {
        match self {
            WritePolicy::AllowAll => WriteScope::AllowAll,
            WritePolicy::OwnerOnly => WriteScope::OwnerOnly,
            WritePolicy::ExplicitList(_) => WriteScope::ExplicitList,
        }
    }

    /// The writer list stored in the `writer_ids` column
    ///
    /// Empty for the non-list variants.
    pub fn writer_ids(&self) -> &[Uuid] {
        match self {
            WritePolicy::ExplicitList(ids) => ids,
            _ => &[],
        }
    }

    /// Reassembles a policy from its two persisted columns
    pub fn from_parts(scope: WriteScope, writer_ids: Vec<Uuid>) -> Self {
        match scope {
            WriteScope::AllowAll => WritePolicy::AllowAll,
            WriteScope::OwnerOnly => WritePolicy::OwnerOnly,
            WriteScope::ExplicitList => WritePolicy::ExplicitList(writer_ids),
        }
    }
}

/// LogHead model representing a diary subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogHead {
    /// Unique log head ID (UUID v4)
    pub id: Uuid,

    /// Human-readable subject of the diary
    pub subject: String,

    /// First day entries are expected for
    pub start_date: DateTime<Utc>,

    /// Last day entries are expected for
    pub end_date: DateTime<Utc>,

    /// Owning account; must reference an existing account
    pub owner_id: Uuid,

    /// Who may append entries
    pub policy: WritePolicy,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

// The policy spans two columns, so the row mapping is spelled out by hand.
impl<'r> FromRow<'r, PgRow> for LogHead {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let scope: WriteScope = row.try_get("write_scope")?;
        let writer_ids: Vec<Uuid> = row.try_get("writer_ids")?;

        Ok(Self {
            id: row.try_get("id")?,
            subject: row.try_get("subject")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            owner_id: row.try_get("owner_id")?,
            policy: WritePolicy::from_parts(scope, writer_ids),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Input for creating a new log head
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLogHead {
    pub subject: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub owner_id: Uuid,
    pub policy: WritePolicy,
}

/// Input for updating an existing log head
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLogHead {
    pub subject: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub owner_id: Option<Uuid>,
    pub policy: Option<WritePolicy>,
}

impl LogHead {
    /// Creates a new log head
    ///
    /// # Errors
    ///
    /// Returns an error if `owner_id` does not reference an existing account
    /// (foreign key violation) or the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateLogHead) -> Result<Self, sqlx::Error> {
        let head = sqlx::query_as::<_, LogHead>(
            r#"
            INSERT INTO log_heads (subject, start_date, end_date, owner_id, write_scope, writer_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, subject, start_date, end_date, owner_id, write_scope, writer_ids,
                      created_at, updated_at
            "#,
        )
        .bind(data.subject)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.owner_id)
        .bind(data.policy.scope())
        .bind(data.policy.writer_ids().to_vec())
        .fetch_one(pool)
        .await?;

        Ok(head)
    }

    /// Finds a log head by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let head = sqlx::query_as::<_, LogHead>(
            r#"
            SELECT id, subject, start_date, end_date, owner_id, write_scope, writer_ids,
                   created_at, updated_at
            FROM log_heads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(head)
    }

    /// Lists all log heads, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let heads = sqlx::query_as::<_, LogHead>(
            r#"
            SELECT id, subject, start_date, end_date, owner_id, write_scope, writer_ids,
                   created_at, updated_at
            FROM log_heads
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(heads)
    }

    /// Lists the log heads a given member may write to
    ///
    /// Mirrors the policy evaluated by
    /// [`can_write`](crate::auth::authorization::can_write), pushed into SQL.
    /// Admins may write anywhere; callers with the admin role should use
    /// [`list`](Self::list) instead.
    pub async fn list_writable(pool: &PgPool, account_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let heads = sqlx::query_as::<_, LogHead>(
            r#"
            SELECT id, subject, start_date, end_date, owner_id, write_scope, writer_ids,
                   created_at, updated_at
            FROM log_heads
            WHERE write_scope = 'allow_all'
               OR (write_scope = 'owner_only' AND owner_id = $1)
               OR (write_scope = 'explicit_list' AND $1 = ANY(writer_ids))
            ORDER BY created_at DESC
            "#,
        )
        .bind(account_id)
        .fetch_all(pool)
        .await?;

        Ok(heads)
    }

    /// Updates an existing log head
    ///
    /// Only non-None fields are written; a new policy replaces both the
    /// scope and the writer list. Returns None if the head doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateLogHead,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE log_heads SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.subject.is_some() {
            bind_count += 1;
            query.push_str(&format!(", subject = ${}", bind_count));
        }
        if data.start_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", start_date = ${}", bind_count));
        }
        if data.end_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", end_date = ${}", bind_count));
        }
        if data.owner_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", owner_id = ${}", bind_count));
        }
        if data.policy.is_some() {
            bind_count += 1;
            query.push_str(&format!(", write_scope = ${}", bind_count));
            bind_count += 1;
            query.push_str(&format!(", writer_ids = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, subject, start_date, end_date, owner_id, \
             write_scope, writer_ids, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, LogHead>(&query).bind(id);

        if let Some(subject) = data.subject {
            q = q.bind(subject);
        }
        if let Some(start_date) = data.start_date {
            q = q.bind(start_date);
        }
        if let Some(end_date) = data.end_date {
            q = q.bind(end_date);
        }
        if let Some(owner_id) = data.owner_id {
            q = q.bind(owner_id);
        }
        if let Some(policy) = data.policy {
            q = q.bind(policy.scope());
            q = q.bind(policy.writer_ids().to_vec());
        }

        let head = q.fetch_optional(pool).await?;

        Ok(head)
    }

    /// Deletes a log head by ID
    ///
    /// All of its log contents go with it via the FK cascade.
    /// Returns true if a head was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM log_heads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_scope_mapping() {
        assert_eq!(WritePolicy::AllowAll.scope(), WriteScope::AllowAll);
        assert_eq!(WritePolicy::OwnerOnly.scope(), WriteScope::OwnerOnly);
        assert_eq!(
            WritePolicy::ExplicitList(vec![]).scope(),
            WriteScope::ExplicitList
        );
    }

    #[test]
    fn test_policy_writer_ids() {
        let id = Uuid::new_v4();
        assert!(WritePolicy::AllowAll.writer_ids().is_empty());
        assert!(WritePolicy::OwnerOnly.writer_ids().is_empty());
        assert_eq!(WritePolicy::ExplicitList(vec![id]).writer_ids(), &[id]);
    }

    #[test]
    fn test_policy_from_parts() {
        let id = Uuid::new_v4();

        // The writer list is ignored for the non-list variants
        assert_eq!(
            WritePolicy::from_parts(WriteScope::AllowAll, vec![id]),
            WritePolicy::AllowAll
        );
        assert_eq!(
            WritePolicy::from_parts(WriteScope::OwnerOnly, vec![]),
            WritePolicy::OwnerOnly
        );
        assert_eq!(
            WritePolicy::from_parts(WriteScope::ExplicitList, vec![id]),
            WritePolicy::ExplicitList(vec![id])
        );
    }

    #[test]
    fn test_policy_serde_roundtrip() {
        let id = Uuid::new_v4();

        let json = serde_json::to_string(&WritePolicy::AllowAll).unwrap();
        assert_eq!(json, r#"{"scope":"allow_all"}"#);

        let policy: WritePolicy =
            serde_json::from_str(&format!(r#"{{"scope":"explicit_list","writer_ids":["{}"]}}"#, id))
                .unwrap();
        assert_eq!(policy, WritePolicy::ExplicitList(vec![id]));

        let back: WritePolicy =
            serde_json::from_str(&serde_json::to_string(&policy).unwrap()).unwrap();
        assert_eq!(back, policy);
    }
}
