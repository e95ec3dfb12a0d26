use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::token::verify_token;
use crate::errors::AppError;
use crate::state::AppState;

/// Identity injected into the request extensions once the bearer token
/// checks out. Handlers read it with `Extension<AuthUser>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

/// Auth gate for protected routes. Missing token -> 401, token that fails
/// signature or expiry -> 403.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    let claims = verify_token(token, &state.config.jwt_secret)?;

    request.extensions_mut().insert(AuthUser {
        username: claims.username,
    });
    Ok(next.run(request).await)
}
