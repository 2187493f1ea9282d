//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User, UserCredentials, UserProfile};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing users.
///
/// Methods taking a `viewer_id` compute [`UserProfile::is_subscribed`]
/// relative to that user; `None` means an anonymous viewer.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_user.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] keyed by `email` or `username` if the
    /// value is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by id as seen by `viewer_id`.
    async fn find_profile(
        &self,
        id: i64,
        viewer_id: Option<i64>,
    ) -> Result<Option<UserProfile>, AppError>;

    /// Finds a user and password hash by login email.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError>;

    /// Finds a user and password hash by id.
    async fn find_credentials_by_id(&self, id: i64) -> Result<Option<UserCredentials>, AppError>;

    /// Returns true if the email is already registered.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    /// Returns true if the username is already registered.
    async fn username_exists(&self, username: &str) -> Result<bool, AppError>;

    /// Lists users ordered by username.
    async fn list(
        &self,
        viewer_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<UserProfile>, AppError>;

    /// Counts all users.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sets or clears the avatar storage path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    async fn update_avatar(&self, id: i64, avatar: Option<String>) -> Result<(), AppError>;

    /// Replaces the stored password hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError>;
}
