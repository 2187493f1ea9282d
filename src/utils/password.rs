//! Password hashing with Argon2id.
//!
//! Hashes are stored as PHC strings, which embed the algorithm parameters and
//! the salt, so verification needs nothing but the stored value.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use serde_json::json;

use crate::error::AppError;

/// Salt length in bytes before base64 encoding.
const SALT_LENGTH_BYTES: usize = 16;

/// Hashes `password` with a fresh random salt.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator or
/// the hasher fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; SALT_LENGTH_BYTES];
    getrandom::fill(&mut salt_bytes).map_err(|e| {
        tracing::error!(error = %e, "Failed to generate password salt");
        AppError::internal("Failed to hash password", json!({}))
    })?;

    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
        tracing::error!(error = %e, "Failed to encode password salt");
        AppError::internal("Failed to hash password", json!({}))
    })?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            AppError::internal("Failed to hash password", json!({}))
        })?;

    Ok(hash.to_string())
}

/// Checks `password` against a stored PHC hash.
///
/// Malformed hashes never verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
