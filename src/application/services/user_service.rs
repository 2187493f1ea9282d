//! User registration, profiles, passwords and avatars.

use std::sync::Arc;

use crate::domain::entities::user::RESERVED_USERNAME;
use crate::domain::entities::{NewUser, User, UserProfile};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::media::{AVATARS_FOLDER, MediaStorage};
use crate::utils::base64_image::decode_data_uri;
use crate::utils::password::{hash_password, verify_password};
use serde_json::json;

/// Registration data after request validation, with the raw password.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Service for user accounts.
pub struct UserService<U: UserRepository> {
    repository: Arc<U>,
    media: Arc<dyn MediaStorage>,
}

impl<U: UserRepository> UserService<U> {
    /// Creates a new user service.
    pub fn new(repository: Arc<U>, media: Arc<dyn MediaStorage>) -> Self {
        Self { repository, media }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] keyed by field if the username is
    /// reserved or the email or username is already taken.
    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        if registration.username.eq_ignore_ascii_case(RESERVED_USERNAME) {
            return Err(AppError::field(
                "username",
                format!("Username '{}' is reserved", RESERVED_USERNAME),
            ));
        }

        if self.repository.email_exists(&registration.email).await? {
            return Err(AppError::field(
                "email",
                "A user with this email already exists",
            ));
        }

        if self.repository.username_exists(&registration.username).await? {
            return Err(AppError::field(
                "username",
                "A user with this username already exists",
            ));
        }

        let password_hash = hash_password(&registration.password)?;

        let user = self
            .repository
            .create(NewUser {
                email: registration.email,
                username: registration.username,
                first_name: registration.first_name,
                last_name: registration.last_name,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Returns a user as seen by `viewer_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_profile(
        &self,
        id: i64,
        viewer_id: Option<i64>,
    ) -> Result<UserProfile, AppError> {
        self.repository
            .find_profile(id, viewer_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    /// Lists users ordered by username, with the total count.
    pub async fn list(
        &self,
        viewer_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<UserProfile>, i64), AppError> {
        let users = self.repository.list(viewer_id, offset, limit).await?;
        let total = self.repository.count().await?;

        Ok((users, total))
    }

    /// Changes the password after checking the current one.
    ///
    /// Existing tokens stay valid.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] keyed by `current_password` if it does
    /// not match.
    pub async fn set_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let credentials = self
            .repository
            .find_credentials_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))?;

        if !verify_password(current_password, &credentials.password_hash) {
            return Err(AppError::field("current_password", "Wrong password"));
        }

        let password_hash = hash_password(new_password)?;
        self.repository
            .update_password(user_id, &password_hash)
            .await?;

        tracing::info!(user_id, "Password changed");

        Ok(())
    }

    /// Stores a new avatar from a data URI and returns its storage path.
    ///
    /// The previous avatar file, if any, is removed best-effort.
    pub async fn set_avatar(&self, user_id: i64, data_uri: &str) -> Result<String, AppError> {
        let image = decode_data_uri("avatar", data_uri)?;

        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))?;

        let path = self.media.save(AVATARS_FOLDER, image).await?;

        if let Err(e) = self
            .repository
            .update_avatar(user_id, Some(path.clone()))
            .await
        {
            self.discard_file(&path).await;
            return Err(e);
        }

        if let Some(old) = user.avatar {
            self.discard_file(&old).await;
        }

        Ok(path)
    }

    /// Clears the avatar and removes its file best-effort.
    pub async fn delete_avatar(&self, user_id: i64) -> Result<(), AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))?;

        self.repository.update_avatar(user_id, None).await?;

        if let Some(old) = user.avatar {
            self.discard_file(&old).await;
        }

        Ok(())
    }

    /// Absolute URL of a stored media path.
    pub fn media_url(&self, path: &str) -> String {
        self.media.url(path)
    }

    async fn discard_file(&self, path: &str) {
        if let Err(e) = self.media.delete(path).await {
            tracing::warn!(error = %e, path, "Failed to remove media file");
        }
    }
}
