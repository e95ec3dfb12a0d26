//! Password hashing. Argon2id with a per-hash random salt; the stored value
//! is a self-describing PHC string, so parameters can change without a
//! migration.

use anyhow::anyhow;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow!("password hashing failed: {e}")))
}

/// Returns false for a mismatch AND for an unparseable stored hash; both are
/// invalid-credential outcomes from the caller's perspective.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies_original_password() {
        let hash = hash_password("p1").unwrap();
        assert!(verify_password("p1", &hash));
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let hash = hash_password("p1").unwrap();
        assert!(!verify_password("p2", &hash));
    }

    #[test]
    fn test_salts_are_random() {
        let a = hash_password("p1").unwrap();
        let b = hash_password("p1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_stored_hash_is_rejected() {
        assert!(!verify_password("p1", "not-a-phc-string"));
    }
}
