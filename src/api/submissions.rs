use crate::api::AppState;
use crate::api::middleware::AdminUser;
use crate::api::schemas::submissions::{ActionResponse, SubmissionResponse};
use crate::error::Result;
use axum::{
    Json,
    extract::{Path, State},
};

/// Lists every submission for the dashboard, newest first.
///
/// # Errors
/// Returns `AppError::AuthError`/`AppError::Forbidden` for non-admins.
/// Returns a store error if the submissions cannot be read.
pub async fn list_submissions(
    admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SubmissionResponse>>> {
    let submissions = state.contact_service.list().await?;
    tracing::debug!(admin = %admin.login, count = submissions.len(), "Listing submissions");

    Ok(Json(submissions.into_iter().map(Into::into).collect()))
}

/// Toggles a submission between read and unread.
pub async fn toggle_read(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<ActionResponse> {
    Json(state.contact_service.set_read_status(id).await.into())
}

/// Permanently deletes a submission.
pub async fn delete_submission(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<ActionResponse> {
    Json(state.contact_service.remove(id).await.into())
}
