//! Bearer token issue/verify. Stateless HS256 JWTs carrying the username;
//! no server-side session ever exists, every request re-verifies.

use anyhow::Context;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Identity claim embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    /// Unix timestamp. Always set; lifetime comes from `JWT_TTL_HOURS`.
    pub exp: i64,
}

/// Signs a token for `username` expiring `ttl_hours` from now.
pub fn issue_token(username: &str, secret: &str, ttl_hours: i64) -> Result<String, AppError> {
    let exp = (Utc::now() + Duration::hours(ttl_hours)).timestamp();
    let claims = Claims {
        username: username.to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("failed to sign token")?;
    Ok(token)
}

/// Verifies signature and expiry. Any failure collapses to `Forbidden`;
/// the caller cannot distinguish tampering from expiry.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Forbidden)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_round_trip_preserves_username() {
        let token = issue_token("alice", SECRET, 24).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token("alice", SECRET, 24).unwrap();
        assert!(matches!(
            verify_token(&token, "other-secret"),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = issue_token("alice", SECRET, 24).unwrap();
        // Corrupt the payload segment
        let mut parts: Vec<&str> = token.split('.').collect();
        let tampered_payload = format!("{}AAAA", parts[1]);
        parts[1] = &tampered_payload;
        let tampered = parts.join(".");
        assert!(matches!(
            verify_token(&tampered, SECRET),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Issued two hours in the past, well beyond the default leeway
        let token = issue_token("alice", SECRET, -2).unwrap();
        assert!(matches!(
            verify_token(&token, SECRET),
            Err(AppError::Forbidden)
        ));
    }
}
