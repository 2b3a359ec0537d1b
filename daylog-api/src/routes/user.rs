/// Current-account profile endpoints
///
/// # Endpoints
///
/// - `GET /api/user` - The authenticated account's profile
/// - `PUT /api/user` - Self-service profile update (role cannot be changed)
use axum::{extract::State, Extension, Json};
use daylog_shared::auth::password;
use daylog_shared::models::account::{Account, UpdateAccount};
use serde::Deserialize;
use validator::Validate;

use super::accounts::AccountResponse;
use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult},
};

/// Self-service profile update request
///
/// Accounts cannot change their own role; only an admin can, via
/// `PUT /api/admin/accounts/:id`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: Option<String>,
}

/// Returns the authenticated account's profile
///
/// # Errors
///
/// - `404 Not Found`: the account behind the token no longer exists
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<AccountResponse>> {
    let account = Account::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

    Ok(Json(account.into()))
}

/// Updates the authenticated account's profile
///
/// # Errors
///
/// - `400 Bad Request`: validation failed, or duplicate username/email
/// - `404 Not Found`: the account behind the token no longer exists
pub async fn update_current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<AccountResponse>> {
    req.validate()?;

    let password_hash = match req.password {
        Some(ref plain) => Some(password::hash_password(plain)?),
        None => None,
    };

    let account = Account::update(
        &state.db,
        auth.user_id,
        UpdateAccount {
            username: req.username,
            email: req.email,
            phone: req.phone.map(Some),
            password_hash,
            role: None,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

    Ok(Json(account.into()))
}
