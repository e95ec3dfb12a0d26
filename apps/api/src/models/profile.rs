use serde::Serialize;
use sqlx::FromRow;

/// Employer profile fields as returned to clients (camelCase per the API).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfile {
    pub company_name: Option<String>,
    pub address: Option<String>,
}

/// Job-seeker profile fields as returned to clients.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobSeekerProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub skills: Option<String>,
    pub work_experience: Option<String>,
    pub email: Option<String>,
    pub resume_url: Option<String>,
}

/// Row of the job-seeker directory listing (joined with `users`).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobSeekerSummary {
    pub user_id: i32,
    pub username: String,
    pub email: Option<String>,
}

/// Full job-seeker detail view (joined with `users`), keyed by username.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobSeekerDetails {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub skills: Option<String>,
    pub work_experience: Option<String>,
    pub resume_url: Option<String>,
}
