/// Log content endpoints
///
/// Creating an entry requires write permission on the head, per its policy;
/// editing and deleting an entry require being its writer or an admin.
///
/// # Endpoints
///
/// - `GET    /api/log-heads/:id/contents` - List one head's entries
/// - `POST   /api/log-contents` - Append an entry
/// - `PUT    /api/log-contents/:id` - Edit an entry
/// - `DELETE /api/log-contents/:id` - Delete an entry
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use daylog_shared::auth::authorization::{require_can_write, require_writer_or_admin};
use daylog_shared::models::log_content::{CreateLogContent, LogContent, UpdateLogContent};
use daylog_shared::models::log_head::LogHead;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult},
};

/// Create log content request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLogContentRequest {
    pub log_head_id: Uuid,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    pub entry_date: DateTime<Utc>,
}

/// Update log content request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLogContentRequest {
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,

    pub entry_date: Option<DateTime<Utc>>,
}

/// List all entries of a log head, oldest entry date first
///
/// # Errors
///
/// - `404 Not Found`: no such log head
pub async fn list_log_contents(
    State(state): State<AppState>,
    Path(log_head_id): Path<Uuid>,
) -> ApiResult<Json<Vec<LogContent>>> {
    LogHead::find_by_id(&state.db, log_head_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Log head not found".to_string()))?;

    let entries = LogContent::list_by_head(&state.db, log_head_id).await?;

    Ok(Json(entries))
}

/// Append an entry to a log head
///
/// The writer is always the authenticated account; the head's write policy
/// is checked first.
///
/// # Endpoint
///
/// ```text
/// POST /api/log-contents
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "log_head_id": "uuid",
///   "content": "Today we...",
///   "entry_date": "2025-06-12T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `403 Forbidden`: the head's policy rejects the caller
/// - `404 Not Found`: no such log head
pub async fn create_log_content(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateLogContentRequest>,
) -> ApiResult<(StatusCode, Json<LogContent>)> {
    req.validate()?;

    let head = LogHead::find_by_id(&state.db, req.log_head_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Log head not found".to_string()))?;

    require_can_write(auth.role, auth.user_id, &head)?;

    let entry = LogContent::create(
        &state.db,
        CreateLogContent {
            log_head_id: head.id,
            writer_id: auth.user_id,
            content: req.content,
            entry_date: req.entry_date,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Edit an entry
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `403 Forbidden`: caller is neither the writer nor an admin
/// - `404 Not Found`: no such entry
pub async fn update_log_content(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateLogContentRequest>,
) -> ApiResult<Json<LogContent>> {
    req.validate()?;

    let existing = LogContent::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Log content not found".to_string()))?;

    require_writer_or_admin(auth.role, auth.user_id, existing.writer_id)?;

    let entry = LogContent::update(
        &state.db,
        id,
        UpdateLogContent {
            content: req.content,
            entry_date: req.entry_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Log content not found".to_string()))?;

    Ok(Json(entry))
}

/// Delete an entry
///
/// # Errors
///
/// - `403 Forbidden`: caller is neither the writer nor an admin
/// - `404 Not Found`: no such entry
pub async fn delete_log_content(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let existing = LogContent::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Log content not found".to_string()))?;

    require_writer_or_admin(auth.role, auth.user_id, existing.writer_id)?;

    LogContent::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
