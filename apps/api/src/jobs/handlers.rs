//! Job posting, browsing, and editing.
//!
//! Access policy is deliberately per-route: listing all jobs is open to any
//! authenticated user, while reading or updating a single job by id is
//! owner-only. Do not "unify" these without a requirements change.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::middleware::AuthUser;
use crate::db::like_pattern;
use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::models::user::{find_user_ref, UserRef};
use crate::state::AppState;

/// Full job field set; POST and PUT both carry every mutable field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    pub job_title: String,
    pub job_description: String,
    pub tags: String,
    pub budget: f64,
    pub duration: String,
}

async fn require_user(state: &AppState, username: &str) -> Result<UserRef, AppError> {
    find_user_ref(&state.db, username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// POST /api/jobs
pub async fn post_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<JobPayload>,
) -> Result<Json<Value>, AppError> {
    let user_row = require_user(&state, &user.username).await?;

    sqlx::query(
        "INSERT INTO jobs (user_id, job_title, job_description, tags, budget, duration) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(user_row.user_id)
    .bind(&req.job_title)
    .bind(&req.job_description)
    .bind(&req.tags)
    .bind(req.budget)
    .bind(&req.duration)
    .execute(&state.db)
    .await?;

    info!("'{}' posted job '{}'", user.username, req.job_title);
    Ok(Json(json!({ "message": "Job posted successfully" })))
}

/// GET /api/jobs_for_user — jobs owned by the caller.
pub async fn jobs_for_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let user_row = require_user(&state, &user.username).await?;

    let jobs: Vec<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE user_id = $1")
        .bind(user_row.user_id)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(json!({ "jobs": jobs })))
}

/// GET /api/jobs/:id — owner-only read.
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<i32>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let user_row = require_user(&state, &user.username).await?;

    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE job_id = $1 AND user_id = $2")
        .bind(job_id)
        .bind(user_row.user_id)
        .fetch_optional(&state.db)
        .await?;

    let job = job.ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    Ok(Json(json!({ "job": job })))
}

/// PUT /api/jobs/:id — owner-only full overwrite of all mutable fields.
pub async fn update_job(
    State(state): State<AppState>,
    Path(job_id): Path<i32>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<JobPayload>,
) -> Result<Json<Value>, AppError> {
    let user_row = require_user(&state, &user.username).await?;

    let owned: Option<i32> =
        sqlx::query_scalar("SELECT job_id FROM jobs WHERE job_id = $1 AND user_id = $2")
            .bind(job_id)
            .bind(user_row.user_id)
            .fetch_optional(&state.db)
            .await?;
    if owned.is_none() {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    sqlx::query(
        "UPDATE jobs SET job_title = $1, job_description = $2, tags = $3, budget = $4, \
         duration = $5 WHERE job_id = $6",
    )
    .bind(&req.job_title)
    .bind(&req.job_description)
    .bind(&req.tags)
    .bind(req.budget)
    .bind(&req.duration)
    .bind(job_id)
    .execute(&state.db)
    .await?;

    Ok(Json(json!({ "message": "Job updated successfully" })))
}

#[derive(Debug, Deserialize)]
pub struct JobTitleQuery {
    pub job_title: Option<String>,
}

/// GET /api/jobs — all jobs, optional bound-LIKE title filter.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobTitleQuery>,
) -> Result<Json<Value>, AppError> {
    let jobs: Vec<JobRow> = match params.job_title.as_deref().filter(|t| !t.is_empty()) {
        Some(title) => {
            sqlx::query_as("SELECT * FROM jobs WHERE job_title LIKE $1")
                .bind(like_pattern(title))
                .fetch_all(&state.db)
                .await?
        }
        None => sqlx::query_as("SELECT * FROM jobs").fetch_all(&state.db).await?,
    };

    Ok(Json(json!({ "jobs": jobs })))
}
