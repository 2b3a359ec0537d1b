/// Authorization decision logic
///
/// daylog has two layers of permission:
///
/// 1. **Role**: admins manage accounts and log heads and may write anywhere;
///    members only interact with log contents.
/// 2. **Write policy**: each log head decides which members may append
///    entries, via its [`WritePolicy`].
///
/// All checks here are pure functions over already-loaded data; handlers run
/// them after fetching the resource and before any mutation.
///
/// # Example
///
/// ```no_run
/// use daylog_shared::auth::authorization::{can_write, require_admin};
/// use daylog_shared::models::account::Role;
/// use daylog_shared::models::log_head::LogHead;
/// use uuid::Uuid;
///
/// # fn example(head: &LogHead, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// require_admin(Role::Admin)?;
/// assert!(can_write(Role::Admin, user_id, head));
/// # Ok(())
/// # }
/// ```
use uuid::Uuid;

use crate::models::account::Role;
use crate::models::log_head::{LogHead, WritePolicy};

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Caller is not an administrator
    #[error("admin role required")]
    AdminRequired,

    /// Caller may not write to this log head
    #[error("no write permission for this log head")]
    NotWritable,

    /// Caller is neither the entry's writer nor an admin
    #[error("only the entry's writer or an admin may modify it")]
    NotWriter,
}

/// Decides whether an account may append entries to a log head
///
/// - admins may always write
/// - `AllowAll` admits every account
/// - `OwnerOnly` admits the head's owner
/// - `ExplicitList` admits exactly the listed accounts (the owner is NOT
///   implicitly included)
pub fn can_write(role: Role, user_id: Uuid, head: &LogHead) -> bool {
    if role.is_admin() {
        return true;
    }

    match &head.policy {
        WritePolicy::AllowAll => true,
        WritePolicy::OwnerOnly => head.owner_id == user_id,
        WritePolicy::ExplicitList(ids) => ids.contains(&user_id),
    }
}

/// Requires the admin role
///
/// # Errors
///
/// Returns `AuthzError::AdminRequired` for members
pub fn require_admin(role: Role) -> Result<(), AuthzError> {
    if !role.is_admin() {
        return Err(AuthzError::AdminRequired);
    }

    Ok(())
}

/// Requires write permission on a log head, per [`can_write`]
///
/// # Errors
///
/// Returns `AuthzError::NotWritable` when the policy rejects the account
pub fn require_can_write(role: Role, user_id: Uuid, head: &LogHead) -> Result<(), AuthzError> {
    if !can_write(role, user_id, head) {
        return Err(AuthzError::NotWritable);
    }

    Ok(())
}

/// Requires that the caller wrote an entry, or is an admin
///
/// Applied to log content update/delete: entries are mutable only by their
/// writer or an administrator.
///
/// # Errors
///
/// Returns `AuthzError::NotWriter` otherwise
pub fn require_writer_or_admin(
    role: Role,
    user_id: Uuid,
    writer_id: Uuid,
) -> Result<(), AuthzError> {
    if role.is_admin() || user_id == writer_id {
        return Ok(());
    }

    Err(AuthzError::NotWriter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn head_with(owner_id: Uuid, policy: WritePolicy) -> LogHead {
        LogHead {
            id: Uuid::new_v4(),
            subject: "test subject".to_string(),
            start_date: Utc::now(),
            end_date: Utc::now(),
            owner_id,
            policy,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_can_always_write() {
        let user = Uuid::new_v4();
        let owner = Uuid::new_v4();

        for policy in [
            WritePolicy::AllowAll,
            WritePolicy::OwnerOnly,
            WritePolicy::ExplicitList(vec![]),
        ] {
            let head = head_with(owner, policy);
            assert!(can_write(Role::Admin, user, &head));
        }
    }

    #[test]
    fn test_allow_all_admits_any_member() {
        let head = head_with(Uuid::new_v4(), WritePolicy::AllowAll);
        assert!(can_write(Role::Member, Uuid::new_v4(), &head));
    }

    #[test]
    fn test_owner_only_admits_only_owner() {
        let owner = Uuid::new_v4();
        let head = head_with(owner, WritePolicy::OwnerOnly);

        assert!(can_write(Role::Member, owner, &head));
        assert!(!can_write(Role::Member, Uuid::new_v4(), &head));
    }

    #[test]
    fn test_explicit_list_admits_only_listed() {
        let listed = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let head = head_with(owner, WritePolicy::ExplicitList(vec![listed]));

        assert!(can_write(Role::Member, listed, &head));
        assert!(!can_write(Role::Member, Uuid::new_v4(), &head));

        // The owner is not implicitly a writer
        assert!(!can_write(Role::Member, owner, &head));
    }

    #[test]
    fn test_empty_explicit_list_admits_admins_only() {
        let head = head_with(Uuid::new_v4(), WritePolicy::ExplicitList(vec![]));

        assert!(!can_write(Role::Member, Uuid::new_v4(), &head));
        assert!(can_write(Role::Admin, Uuid::new_v4(), &head));
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(Role::Admin).is_ok());
        assert!(matches!(
            require_admin(Role::Member),
            Err(AuthzError::AdminRequired)
        ));
    }

    #[test]
    fn test_require_can_write() {
        let head = head_with(Uuid::new_v4(), WritePolicy::ExplicitList(vec![]));

        assert!(require_can_write(Role::Admin, Uuid::new_v4(), &head).is_ok());
        assert!(matches!(
            require_can_write(Role::Member, Uuid::new_v4(), &head),
            Err(AuthzError::NotWritable)
        ));
    }

    #[test]
    fn test_require_writer_or_admin() {
        let writer = Uuid::new_v4();

        assert!(require_writer_or_admin(Role::Member, writer, writer).is_ok());
        assert!(require_writer_or_admin(Role::Admin, Uuid::new_v4(), writer).is_ok());
        assert!(matches!(
            require_writer_or_admin(Role::Member, Uuid::new_v4(), writer),
            Err(AuthzError::NotWriter)
        ));
    }
}
