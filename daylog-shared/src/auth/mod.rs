/// Authentication and authorization utilities
///
/// This module provides the security primitives for daylog:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation
/// - [`authorization`]: role and write-policy decision logic
///
/// # Example
///
/// ```no_run
/// use daylog_shared::auth::password::{hash_password, verify_password};
/// use daylog_shared::auth::jwt::{create_token, validate_token, Claims};
/// use daylog_shared::models::account::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), Role::Member);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```
pub mod authorization;
pub mod jwt;
pub mod password;
