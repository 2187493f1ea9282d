//! Media storage trait and error types.

use async_trait::async_trait;
use serde_json::json;

use crate::error::AppError;
use crate::utils::base64_image::DecodedImage;

/// Folder for recipe images, relative to the media root.
pub const RECIPE_IMAGES_FOLDER: &str = "recipes/images";

/// Folder for user avatars, relative to the media root.
pub const AVATARS_FOLDER: &str = "users/avatars";

/// Errors that can occur during media operations.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Media I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid media path: {0}")]
    InvalidPath(String),
}

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

impl From<MediaError> for AppError {
    fn from(e: MediaError) -> Self {
        tracing::error!(error = %e, "Media storage error");
        AppError::internal("Failed to store media", json!({}))
    }
}

/// Trait for storing uploaded images.
///
/// Stored files are addressed by a relative path such as
/// `recipes/images/<name>.png`; that path is what the database keeps.
///
/// # Implementations
///
/// - [`crate::infrastructure::media::LocalMediaStorage`] - Files under a media root directory
/// - [`crate::infrastructure::media::NullMediaStorage`] - Discards writes, for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Stores an image under `folder` with a fresh random name.
    ///
    /// Returns the relative path of the stored file.
    async fn save(&self, folder: &str, image: DecodedImage) -> MediaResult<String>;

    /// Removes a stored file.
    ///
    /// Missing files are not an error.
    async fn delete(&self, path: &str) -> MediaResult<()>;

    /// Absolute URL the file at `path` is served from.
    fn url(&self, path: &str) -> String;
}

/// Joins a public base URL and a relative media path.
pub fn media_url(public_url: &str, path: &str) -> String {
    format!(
        "{}/media/{}",
        public_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
