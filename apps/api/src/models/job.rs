use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Job row, serialized column-for-column in listings and detail views.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobRow {
    pub job_id: i32,
    pub user_id: i32,
    pub job_title: String,
    pub job_description: String,
    pub tags: String,
    pub budget: f64,
    pub duration: String,
    pub created_at: DateTime<Utc>,
}

/// Row of the applicant listing for a job (joined with `users`).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicantRow {
    pub user_id: i32,
    pub username: String,
}
