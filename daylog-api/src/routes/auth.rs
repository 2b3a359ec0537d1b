/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/login` - Verify credentials and issue a token
use axum::{extract::State, Json};
use daylog_shared::{
    auth::{jwt, password},
    models::account::{Account, Role},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Returned for unknown usernames AND wrong passwords, so the two cases are
/// indistinguishable to a caller.
const BAD_CREDENTIALS: &str = "Invalid username or password";

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed JWT, valid for 24 hours
    pub token: String,

    /// The account's role, for client-side routing
    pub role: Role,
}

/// Login endpoint
///
/// Verifies the submitted username/password against the stored Argon2id hash
/// and, on success, issues an HS256-signed token carrying the account's ID
/// and role.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "secret"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing fields
/// - `401 Unauthorized`: unknown username or wrong password
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let account = Account::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

    let valid = password::verify_password(&req.password, &account.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    let claims = jwt::Claims::new(account.id, account.role);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::debug!(account_id = %account.id, role = account.role.as_str(), "login succeeded");

    Ok(Json(LoginResponse {
        token,
        role: account.role,
    }))
}
