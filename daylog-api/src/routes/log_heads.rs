/// Log head endpoints
///
/// Admin endpoints manage the heads themselves; member endpoints only read
/// them. The write policy decides who may append entries, not who may see a
/// head: every authenticated account can list all heads.
///
/// # Endpoints
///
/// - `GET    /api/admin/log-heads` - List all heads (admin)
/// - `POST   /api/admin/log-heads` - Create (admin)
/// - `PUT    /api/admin/log-heads/:id` - Update (admin)
/// - `DELETE /api/admin/log-heads/:id` - Delete, cascades entries (admin)
/// - `GET    /api/log-heads` - List all heads
/// - `GET    /api/log-heads/writable` - Heads the caller may write to
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use daylog_shared::models::log_head::{CreateLogHead, LogHead, UpdateLogHead, WritePolicy};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult, ValidationErrorDetail},
};

/// Create log head request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLogHeadRequest {
    #[validate(length(min = 1, max = 255, message = "Subject must be 1-255 characters"))]
    pub subject: String,

    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,

    pub owner_id: Uuid,

    pub policy: WritePolicy,
}

/// Update log head request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLogHeadRequest {
    #[validate(length(min = 1, max = 255, message = "Subject must be 1-255 characters"))]
    pub subject: Option<String>,

    pub start_date: Option<DateTime<Utc>>,

    pub end_date: Option<DateTime<Utc>>,

    pub owner_id: Option<Uuid>,

    pub policy: Option<WritePolicy>,
}

fn check_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ApiError> {
    if end < start {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "end_date".to_string(),
            message: "End date must not be before start date".to_string(),
        }]));
    }

    Ok(())
}

/// List all log heads (admin view)
pub async fn admin_list_log_heads(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<LogHead>>> {
    let heads = LogHead::list(&state.db).await?;

    Ok(Json(heads))
}

/// Create a new log head
///
/// # Endpoint
///
/// ```text
/// POST /api/admin/log-heads
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "subject": "Project diary",
///   "start_date": "2025-06-01T00:00:00Z",
///   "end_date": "2025-07-01T00:00:00Z",
///   "owner_id": "uuid",
///   "policy": {"scope": "explicit_list", "writer_ids": ["uuid"]}
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed, or owner does not exist
pub async fn create_log_head(
    State(state): State<AppState>,
    Json(req): Json<CreateLogHeadRequest>,
) -> ApiResult<(StatusCode, Json<LogHead>)> {
    req.validate()?;
    check_date_range(req.start_date, req.end_date)?;

    let head = LogHead::create(
        &state.db,
        CreateLogHead {
            subject: req.subject,
            start_date: req.start_date,
            end_date: req.end_date,
            owner_id: req.owner_id,
            policy: req.policy,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(head)))
}

/// Update an existing log head
///
/// A new policy replaces scope and writer list together.
///
/// # Errors
///
/// - `400 Bad Request`: validation failed, or new owner does not exist
/// - `404 Not Found`: no such log head
pub async fn update_log_head(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateLogHeadRequest>,
) -> ApiResult<Json<LogHead>> {
    req.validate()?;

    let existing = LogHead::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Log head not found".to_string()))?;

    // Validate the range the head will end up with
    let start = req.start_date.unwrap_or(existing.start_date);
    let end = req.end_date.unwrap_or(existing.end_date);
    check_date_range(start, end)?;

    let head = LogHead::update(
        &state.db,
        id,
        UpdateLogHead {
            subject: req.subject,
            start_date: req.start_date,
            end_date: req.end_date,
            owner_id: req.owner_id,
            policy: req.policy,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Log head not found".to_string()))?;

    Ok(Json(head))
}

/// Delete a log head
///
/// All of its entries are deleted with it.
///
/// # Errors
///
/// - `404 Not Found`: no such log head
pub async fn delete_log_head(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = LogHead::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Log head not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List all log heads (member view)
pub async fn list_log_heads(State(state): State<AppState>) -> ApiResult<Json<Vec<LogHead>>> {
    let heads = LogHead::list(&state.db).await?;

    Ok(Json(heads))
}

/// List the log heads the caller may write to
///
/// Admins may write anywhere, so they get every head.
pub async fn list_writable_log_heads(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<LogHead>>> {
    let heads = if auth.role.is_admin() {
        LogHead::list(&state.db).await?
    } else {
        LogHead::list_writable(&state.db, auth.user_id).await?
    };

    Ok(Json(heads))
}
