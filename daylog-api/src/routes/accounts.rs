/// Admin account management endpoints
///
/// All endpoints here sit behind the JWT and admin-role layers.
///
/// # Endpoints
///
/// - `GET    /api/admin/accounts` - List accounts
/// - `GET    /api/admin/accounts/search?q=` - Search username/email/phone
/// - `POST   /api/admin/accounts` - Create account
/// - `PUT    /api/admin/accounts/:id` - Update account
/// - `DELETE /api/admin/accounts/:id` - Delete account with cascade
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use daylog_shared::auth::password;
use daylog_shared::models::account::{Account, CreateAccount, Role, UpdateAccount};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Account as exposed over the API
///
/// The password hash stays server-side.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            phone: account.phone,
            role: account.role,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Create account request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    /// Role of the new account (defaults to member)
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Member
}

/// Update account request
///
/// All fields optional; a present password is re-hashed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: Option<String>,

    pub role: Option<Role>,
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// List all accounts
pub async fn list_accounts(State(state): State<AppState>) -> ApiResult<Json<Vec<AccountResponse>>> {
    let accounts = Account::list(&state.db).await?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// Search accounts by username, email or phone
///
/// # Errors
///
/// - `400 Bad Request`: empty or missing `q` parameter
pub async fn search_accounts(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<AccountResponse>>> {
    if params.q.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Query parameter 'q' is required".to_string(),
        ));
    }

    let accounts = Account::search(&state.db, params.q.trim()).await?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// Create a new account
///
/// # Endpoint
///
/// ```text
/// POST /api/admin/accounts
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "phone": "555-0100",
///   "password": "correct horse battery",
///   "role": "member"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed, or duplicate username/email
pub async fn create_account(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> ApiResult<(StatusCode, Json<AccountResponse>)> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let account = Account::create(
        &state.db,
        CreateAccount {
            username: req.username,
            email: req.email,
            phone: req.phone,
            password_hash,
            role: req.role,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Update an existing account
///
/// # Errors
///
/// - `400 Bad Request`: validation failed, or duplicate username/email
/// - `404 Not Found`: no such account
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAccountRequest>,
) -> ApiResult<Json<AccountResponse>> {
    req.validate()?;

    let password_hash = match req.password {
        Some(ref plain) => Some(password::hash_password(plain)?),
        None => None,
    };

    let account = Account::update(
        &state.db,
        id,
        UpdateAccount {
            username: req.username,
            email: req.email,
            phone: req.phone.map(Some),
            password_hash,
            role: req.role,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

    Ok(Json(account.into()))
}

/// Delete an account with cascade
///
/// Removes the account from every writer list, deletes the log heads it owns
/// (and their contents), deletes its remaining entries in other owners'
/// heads, then deletes the account, all in one transaction.
///
/// # Errors
///
/// - `404 Not Found`: no such account (nothing is changed)
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Account::delete_with_cascade(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Account not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
