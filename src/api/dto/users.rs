//! DTOs for registration, profiles, passwords and avatars.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use super::MediaUrl;
use crate::application::services::Registration;
use crate::domain::entities::{User, UserProfile};

/// Letters, digits and `@ . + - _`.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").unwrap());

/// Registration payload for `POST /api/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Ensure this field has no more than 254 characters")
    )]
    pub email: String,

    #[validate(
        length(min = 1, max = 150, message = "Username must be 1 to 150 characters"),
        regex(
            path = "*USERNAME_REGEX",
            message = "Username may contain only letters, digits and @/./+/-/_"
        )
    )]
    pub username: String,

    #[validate(length(min = 1, max = 150, message = "First name must be 1 to 150 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 150, message = "Last name must be 1 to 150 characters"))]
    pub last_name: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1 to 128 characters"))]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Self {
            email: request.email,
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
        }
    }
}

/// Newly registered user. The password is never echoed back.
#[derive(Debug, Serialize)]
pub struct RegisteredUserResponse {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for RegisteredUserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Public user representation.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    /// Absolute avatar URL, or `null`.
    pub avatar: Option<String>,
}

impl UserResponse {
    pub fn new(user: User, is_subscribed: bool, media_url: MediaUrl<'_>) -> Self {
        Self {
            avatar: user.avatar.as_deref().map(media_url),
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }

    pub fn from_profile(profile: UserProfile, media_url: MediaUrl<'_>) -> Self {
        Self::new(profile.user, profile.is_subscribed, media_url)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetPasswordRequest {
    #[validate(length(min = 1, message = "This field may not be blank"))]
    pub current_password: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1 to 128 characters"))]
    pub new_password: String,
}

/// Avatar upload as a base64 data URI.
#[derive(Debug, Deserialize, Validate)]
pub struct AvatarRequest {
    #[validate(length(min = 1, message = "This field may not be blank"))]
    pub avatar: String,
}

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar: String,
}
