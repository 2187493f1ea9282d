//! Authentication service for login tokens.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::verify_password;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Number of random bytes in a login token (hex-encoded to 40 characters).
const TOKEN_LENGTH_BYTES: usize = 20;

/// Service for issuing and checking Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService<T: TokenRepository, U: UserRepository> {
    token_repository: Arc<T>,
    user_repository: Arc<U>,
    signing_secret: String,
}

impl<T: TokenRepository, U: UserRepository> AuthService<T, U> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `token_repository` - token storage
    /// - `user_repository` - user lookup for login and token resolution
    /// - `signing_secret` - HMAC key; must match the value used when tokens were issued
    pub fn new(token_repository: Arc<T>, user_repository: Arc<U>, signing_secret: String) -> Self {
        Self {
            token_repository,
            user_repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .map_err(|_| AppError::internal("Invalid token signing secret", json!({})))?;
        mac.update(token.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn generate_token() -> Result<String, AppError> {
        let mut buffer = [0u8; TOKEN_LENGTH_BYTES];
        getrandom::fill(&mut buffer).map_err(|e| {
            tracing::error!(error = %e, "Failed to generate token");
            AppError::internal("Failed to generate token", json!({}))
        })?;
        Ok(hex::encode(buffer))
    }

    /// Checks credentials and issues a new token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is unknown or the password
    /// does not match. Both cases produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let credentials = self.user_repository.find_credentials_by_email(email).await?;

        let Some(credentials) = credentials.filter(|c| verify_password(password, &c.password_hash))
        else {
            return Err(AppError::bad_request(
                "Unable to log in with provided credentials",
                json!({ "non_field_errors": ["Unable to log in with provided credentials"] }),
            ));
        };

        let token = Self::generate_token()?;
        let token_hash = self.hash_token(&token)?;

        self.token_repository
            .replace_token(credentials.user.id, &token_hash)
            .await?;

        tracing::info!(user_id = credentials.user.id, "User logged in");

        Ok(token)
    }

    /// Resolves a raw token to its user.
    ///
    /// On success, updates the `last_used` timestamp; failure to do so is
    /// logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or its
    /// user no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let token_hash = self.hash_token(token)?;

        let invalid = || AppError::unauthorized("Invalid token", json!({}));

        let user_id = self
            .token_repository
            .find_user_id(&token_hash)
            .await?
            .ok_or_else(invalid)?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(invalid)?;

        if let Err(e) = self.token_repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, user_id, "Failed to update token last_used_at");
        }

        Ok(user)
    }

    /// Revokes the user's token.
    pub async fn logout(&self, user_id: i64) -> Result<(), AppError> {
        self.token_repository.delete_for_user(user_id).await?;
        tracing::info!(user_id, "User logged out");
        Ok(())
    }
}
