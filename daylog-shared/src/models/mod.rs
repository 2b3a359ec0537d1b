/// Database models for daylog
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `account`: User accounts with a persisted role
/// - `log_head`: Diary subjects with owner, date range and write policy
/// - `log_content`: Dated entries belonging to a log head
///
/// # Example
///
/// ```no_run
/// use daylog_shared::models::account::{Account, CreateAccount, Role};
/// use daylog_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_account = CreateAccount {
///     username: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     phone: None,
///     password_hash: "$argon2id$...".to_string(),
///     role: Role::Member,
/// };
///
/// let account = Account::create(&pool, new_account).await?;
/// # Ok(())
/// # }
/// ```
pub mod account;
pub mod log_content;
pub mod log_head;
