use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::issue_token;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    pub username: String,
    pub password: String,
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let existing: Option<i32> = sqlx::query_scalar("SELECT user_id FROM users WHERE username = $1")
        .bind(&req.username)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let hashed = hash_password(&req.password)?;
    sqlx::query("INSERT INTO users (username, password) VALUES ($1, $2)")
        .bind(&req.username)
        .bind(&hashed)
        .execute(&state.db)
        .await?;

    info!("Registered user '{}'", req.username);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// POST /api/login
///
/// Unknown username and wrong password return the identical error so the
/// response shape leaks nothing about which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsPayload>,
) -> Result<Json<Value>, AppError> {
    let stored_hash: Option<String> =
        sqlx::query_scalar("SELECT password FROM users WHERE username = $1")
            .bind(&req.username)
            .fetch_optional(&state.db)
            .await?;

    let stored_hash = stored_hash.ok_or(AppError::InvalidCredentials)?;
    if !verify_password(&req.password, &stored_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(
        &req.username,
        &state.config.jwt_secret,
        state.config.jwt_ttl_hours,
    )?;
    Ok(Json(json!({ "token": token })))
}
