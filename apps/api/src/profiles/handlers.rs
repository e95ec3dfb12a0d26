use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::middleware::AuthUser;
use crate::db::like_pattern;
use crate::errors::AppError;
use crate::models::profile::{EmployerProfile, JobSeekerDetails, JobSeekerProfile, JobSeekerSummary};
use crate::models::user::find_user_ref;
use crate::profiles::category::ProfileCategory;
use crate::profiles::storage::{upload_resume, ResumeUpload};
use crate::state::AppState;

/// Text fields plus the optional `resume` file part of a profile form.
struct ProfileForm {
    fields: HashMap<String, String>,
    resume: Option<ResumeUpload>,
}

impl ProfileForm {
    fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }
}

async fn read_profile_form(mut multipart: Multipart) -> Result<ProfileForm, AppError> {
    let mut fields = HashMap::new();
    let mut resume = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == "resume" {
            let filename = field.file_name().unwrap_or("resume").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read resume upload: {e}")))?;
            resume = Some(ResumeUpload {
                filename,
                content_type,
                data,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read field '{name}': {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok(ProfileForm { fields, resume })
}

/// Profile fields merged with identity for the user-details view.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserDetails<T: Serialize> {
    #[serde(flatten)]
    profile: T,
    username: String,
    profile_type: &'static str,
}

fn details_json<T: Serialize>(
    profile: T,
    username: &str,
    category: ProfileCategory,
) -> Result<Value, AppError> {
    serde_json::to_value(UserDetails {
        profile,
        username: username.to_string(),
        profile_type: category.as_str(),
    })
    .map_err(|e| AppError::Internal(e.into()))
}

/// GET /api/user-details
pub async fn user_details(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let user_row = find_user_ref(&state.db, &user.username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let is_registered: bool =
        sqlx::query_scalar("SELECT is_registered FROM users WHERE user_id = $1")
            .bind(user_row.user_id)
            .fetch_one(&state.db)
            .await?;
    if !is_registered {
        return Ok(Json(json!({ "isRegistered": false })));
    }

    let category = user_row
        .profile_category
        .as_deref()
        .and_then(ProfileCategory::from_stored);

    // Registered but the profile row is gone (or the category is unknown):
    // report registration with null details rather than erroring.
    let details = match category {
        Some(ProfileCategory::Employer) => {
            let profile: Option<EmployerProfile> = sqlx::query_as(
                "SELECT company_name, address FROM employer_profiles WHERE user_id = $1",
            )
            .bind(user_row.user_id)
            .fetch_optional(&state.db)
            .await?;
            profile
                .map(|p| details_json(p, &user.username, ProfileCategory::Employer))
                .transpose()?
        }
        Some(ProfileCategory::JobSeeker) => {
            let profile: Option<JobSeekerProfile> = sqlx::query_as(
                "SELECT first_name, last_name, skills, work_experience, email, resume_url \
                 FROM job_seeker_profiles WHERE user_id = $1",
            )
            .bind(user_row.user_id)
            .fetch_optional(&state.db)
            .await?;
            profile
                .map(|p| details_json(p, &user.username, ProfileCategory::JobSeeker))
                .transpose()?
        }
        None => None,
    };

    Ok(Json(json!({
        "isRegistered": true,
        "userDetails": details
    })))
}

/// POST /api/profile/:type
///
/// Profile insert and the users-row flag update commit atomically; a crash
/// midway leaves no half-registered user.
pub async fn create_profile(
    State(state): State<AppState>,
    Path(profile_type): Path<String>,
    Extension(user): Extension<AuthUser>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let category = ProfileCategory::parse(&profile_type)?;
    let form = read_profile_form(multipart).await?;

    let user_row = find_user_ref(&state.db, &user.username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Upload first so a storage failure never leaves a committed profile
    // pointing at nothing.
    let resume_url = match &form.resume {
        Some(upload) => Some(
            upload_resume(
                &state.s3,
                &state.config.s3_bucket,
                &state.config.s3_endpoint,
                upload,
            )
            .await?,
        ),
        None => None,
    };

    let mut tx = state.db.begin().await?;
    match category {
        ProfileCategory::Employer => {
            sqlx::query(
                "INSERT INTO employer_profiles (user_id, company_name, address) \
                 VALUES ($1, $2, $3)",
            )
            .bind(user_row.user_id)
            .bind(form.text("companyName"))
            .bind(form.text("address"))
            .execute(&mut *tx)
            .await?;
        }
        ProfileCategory::JobSeeker => {
            sqlx::query(
                "INSERT INTO job_seeker_profiles \
                 (user_id, first_name, last_name, skills, work_experience, email, resume_url) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(user_row.user_id)
            .bind(form.text("firstName"))
            .bind(form.text("lastName"))
            .bind(form.text("skills"))
            .bind(form.text("workExperience"))
            .bind(form.text("email"))
            .bind(resume_url.as_deref())
            .execute(&mut *tx)
            .await?;
        }
    }
    sqlx::query("UPDATE users SET is_registered = TRUE, profile_category = $1 WHERE user_id = $2")
        .bind(category.as_str())
        .bind(user_row.user_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!(
        "Created {} profile for '{}'",
        category.as_str(),
        user.username
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Profile created and user updated successfully" })),
    ))
}

/// POST /api/update-user
///
/// Overwrites the caller's profile in place. The stored profile_category
/// picks the table; a caller who never created a profile updates nothing.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let form = read_profile_form(multipart).await?;

    let user_row = find_user_ref(&state.db, &user.username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let category = user_row
        .profile_category
        .as_deref()
        .and_then(ProfileCategory::from_stored);

    match category {
        Some(ProfileCategory::Employer) => {
            sqlx::query(
                "UPDATE employer_profiles SET company_name = $1, address = $2 WHERE user_id = $3",
            )
            .bind(form.text("companyName"))
            .bind(form.text("address"))
            .bind(user_row.user_id)
            .execute(&state.db)
            .await?;
        }
        Some(ProfileCategory::JobSeeker) => {
            let resume_url = match &form.resume {
                Some(upload) => Some(
                    upload_resume(
                        &state.s3,
                        &state.config.s3_bucket,
                        &state.config.s3_endpoint,
                        upload,
                    )
                    .await?,
                ),
                None => None,
            };

            // Field overwrite and resume-url update commit together.
            let mut tx = state.db.begin().await?;
            sqlx::query(
                "UPDATE job_seeker_profiles \
                 SET first_name = $1, last_name = $2, skills = $3, work_experience = $4, email = $5 \
                 WHERE user_id = $6",
            )
            .bind(form.text("firstName"))
            .bind(form.text("lastName"))
            .bind(form.text("skills"))
            .bind(form.text("workExperience"))
            .bind(form.text("email"))
            .bind(user_row.user_id)
            .execute(&mut *tx)
            .await?;
            if let Some(url) = &resume_url {
                sqlx::query("UPDATE job_seeker_profiles SET resume_url = $1 WHERE user_id = $2")
                    .bind(url)
                    .bind(user_row.user_id)
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await?;
        }
        None => {} // no profile yet, nothing to overwrite
    }

    Ok(Json(json!({ "message": "User details updated successfully" })))
}

#[derive(Debug, Deserialize)]
pub struct SkillsQuery {
    pub skills: Option<String>,
}

/// GET /api/job-seekers
///
/// The skills filter is always a bound LIKE parameter; the search term is
/// never spliced into the SQL text.
pub async fn list_job_seekers(
    State(state): State<AppState>,
    Query(params): Query<SkillsQuery>,
) -> Result<Json<Value>, AppError> {
    const BASE: &str = "SELECT u.user_id, u.username, jsm.email \
         FROM users u \
         JOIN job_seeker_profiles jsm ON u.user_id = jsm.user_id \
         WHERE u.profile_category = 'jobSeeker'";
    const FILTERED: &str = "SELECT u.user_id, u.username, jsm.email \
         FROM users u \
         JOIN job_seeker_profiles jsm ON u.user_id = jsm.user_id \
         WHERE u.profile_category = 'jobSeeker' AND jsm.skills LIKE $1";

    let job_seekers: Vec<JobSeekerSummary> =
        match params.skills.as_deref().filter(|s| !s.is_empty()) {
            Some(term) => {
                sqlx::query_as(FILTERED)
                    .bind(like_pattern(term))
                    .fetch_all(&state.db)
                    .await?
            }
            None => sqlx::query_as(BASE).fetch_all(&state.db).await?,
        };

    Ok(Json(json!({ "jobSeekers": job_seekers })))
}

/// GET /api/job-seeker/:username
pub async fn job_seeker_details(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, AppError> {
    let details: Option<JobSeekerDetails> = sqlx::query_as(
        "SELECT u.username, jsm.first_name, jsm.last_name, jsm.email, jsm.skills, \
                jsm.work_experience, jsm.resume_url \
         FROM users u \
         JOIN job_seeker_profiles jsm ON u.user_id = jsm.user_id \
         WHERE u.username = $1 AND u.profile_category = 'jobSeeker'",
    )
    .bind(&username)
    .fetch_optional(&state.db)
    .await?;

    let details = details.ok_or_else(|| AppError::NotFound("Job seeker not found".to_string()))?;
    Ok(Json(json!({ "jobSeekerDetails": details })))
}
