//! Repository trait for follow relationships.

use crate::domain::entities::FollowedAuthor;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user-to-author subscriptions.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgFollowRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_follow.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Subscribes `user_id` to `author_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the subscription already exists.
    /// Returns [`AppError::Validation`] if the store rejects a self-follow.
    async fn create(&self, user_id: i64, author_id: i64) -> Result<(), AppError>;

    /// Returns `Ok(true)` if a subscription was removed.
    async fn delete(&self, user_id: i64, author_id: i64) -> Result<bool, AppError>;

    async fn exists(&self, user_id: i64, author_id: i64) -> Result<bool, AppError>;

    /// Lists authors followed by `user_id`, ordered by username, each with
    /// their total recipe count.
    async fn list_followed(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<FollowedAuthor>, AppError>;

    async fn count_followed(&self, user_id: i64) -> Result<i64, AppError>;
}
