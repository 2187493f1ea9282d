//! User entity and its viewer-relative profile.

use chrono::{DateTime, Utc};

/// Maximum length of username, first name and last name.
pub const NAME_MAX_LENGTH: u64 = 150;

/// Maximum length of an email address.
pub const EMAIL_MAX_LENGTH: u64 = 254;

/// Username reserved for the `/users/me` endpoint.
pub const RESERVED_USERNAME: &str = "me";

/// A registered user.
///
/// `avatar` holds the storage path of the uploaded image, not a URL.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(
        id: i64,
        email: String,
        username: String,
        first_name: String,
        last_name: String,
        avatar: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            username,
            first_name,
            last_name,
            avatar,
            created_at,
        }
    }
}

/// A user as seen by another (possibly anonymous) user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user: User,
    /// Whether the viewer follows this user. Always `false` for anonymous viewers.
    pub is_subscribed: bool,
}

/// A user together with the stored password hash, used only for login.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Input data for registering a user.
///
/// `password_hash` is an Argon2 PHC string; raw passwords never reach the
/// repository layer.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let now = Utc::now();
        let user = User::new(
            1,
            "chef@example.com".to_string(),
            "chef".to_string(),
            "Gordon".to_string(),
            "Ramsay".to_string(),
            None,
            now,
        );

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "chef");
        assert!(user.avatar.is_none());
        assert_eq!(user.created_at, now);
    }

    #[test]
    fn test_profile_wraps_user() {
        let user = User::new(
            2,
            "baker@example.com".to_string(),
            "baker".to_string(),
            "Paul".to_string(),
            "Hollywood".to_string(),
            Some("users/avatars/abc.png".to_string()),
            Utc::now(),
        );
        let profile = UserProfile {
            user: user.clone(),
            is_subscribed: true,
        };

        assert_eq!(profile.user, user);
        assert!(profile.is_subscribed);
    }
}
