//! Repository trait for authentication tokens.

use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for login tokens.
///
/// Each user holds at most one token. Tokens are stored as HMAC-SHA256 hashes;
/// raw values never reach the database.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_token.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Stores `token_hash` as the user's token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn replace_token(&self, user_id: i64, token_hash: &str) -> Result<(), AppError>;

    /// Resolves a token hash to the id of its owner.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user_id))` if the token exists
    /// - `Ok(None)` otherwise
    async fn find_user_id(&self, token_hash: &str) -> Result<Option<i64>, AppError>;

    /// Updates the `last_used_at` timestamp for a token.
    ///
    /// Called after successful authentication to track token usage.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Deletes the user's token.
    ///
    /// Returns `Ok(true)` if a token was removed.
    async fn delete_for_user(&self, user_id: i64) -> Result<bool, AppError>;
}
