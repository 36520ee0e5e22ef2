use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand_core::OsRng;

use crate::error::AppError;

/// Hash a password into a PHC string using Argon2 defaults and a fresh salt.
#[tracing::instrument(skip_all)]
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordError(e.to_string()))
}

/// Check a candidate password against a stored PHC string.
///
/// A malformed digest never verifies.
#[tracing::instrument(skip_all)]
pub fn verify_password(digest: &str, candidate: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        tracing::warn!("Stored password digest is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}
