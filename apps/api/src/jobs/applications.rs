//! Job applications. The (user_id, job_id) pair is checked before insert and
//! also enforced by the composite primary key, so a race between two
//! identical requests still cannot produce a duplicate row.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::middleware::AuthUser;
use crate::errors::AppError;
use crate::models::job::ApplicantRow;
use crate::models::user::find_user_ref;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyPayload {
    pub job_id: i32,
}

/// POST /api/apply-job
pub async fn apply_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<ApplyPayload>,
) -> Result<Json<Value>, AppError> {
    let user_row = find_user_ref(&state.db, &user.username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let existing: Option<i32> = sqlx::query_scalar(
        "SELECT job_id FROM job_applications WHERE user_id = $1 AND job_id = $2",
    )
    .bind(user_row.user_id)
    .bind(req.job_id)
    .fetch_optional(&state.db)
    .await?;
    if existing.is_some() {
        return Err(AppError::AlreadyApplied);
    }

    sqlx::query("INSERT INTO job_applications (user_id, job_id) VALUES ($1, $2)")
        .bind(user_row.user_id)
        .bind(req.job_id)
        .execute(&state.db)
        .await?;

    info!("'{}' applied to job {}", user.username, req.job_id);
    Ok(Json(json!({ "message": "Job application submitted successfully" })))
}

/// GET /api/applied-jobs — job ids the caller has applied to.
pub async fn applied_jobs(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let user_row = find_user_ref(&state.db, &user.username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let applied: Vec<i32> =
        sqlx::query_scalar("SELECT job_id FROM job_applications WHERE user_id = $1")
            .bind(user_row.user_id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(json!({ "appliedJobs": applied })))
}

/// GET /api/jobs/:id/applicants
///
/// Open to any authenticated user, not just the job's owner. That asymmetry
/// with the owner-only job read is part of the API contract.
pub async fn job_applicants(
    State(state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let applicants: Vec<ApplicantRow> = sqlx::query_as(
        "SELECT u.user_id, u.username \
         FROM users u \
         JOIN job_applications ja ON u.user_id = ja.user_id \
         WHERE ja.job_id = $1",
    )
    .bind(job_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({ "applicants": applicants })))
}
