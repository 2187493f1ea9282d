//! Filesystem-backed media storage.

use async_trait::async_trait;
use rand::Rng;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::service::{MediaError, MediaResult, MediaStorage, media_url};
use crate::utils::base64_image::DecodedImage;

const FILE_NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const FILE_NAME_LENGTH: usize = 24;

/// Stores images as files under a media root directory.
///
/// The same directory is served at `/media` by the router.
pub struct LocalMediaStorage {
    root: PathBuf,
    public_url: String,
}

impl LocalMediaStorage {
    /// Creates a storage rooted at `root`, serving URLs under `public_url`.
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.into(),
        }
    }

    /// Resolves a relative media path, rejecting anything that escapes the root.
    fn resolve(&self, relative: &str) -> MediaResult<PathBuf> {
        let path = Path::new(relative);

        let is_plain = path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if relative.is_empty() || !is_plain {
            return Err(MediaError::InvalidPath(relative.to_string()));
        }

        Ok(self.root.join(path))
    }
}

fn random_file_name(extension: &str) -> String {
    let mut rng = rand::rng();

    let stem: String = (0..FILE_NAME_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..FILE_NAME_CHARSET.len());
            FILE_NAME_CHARSET[idx] as char
        })
        .collect();

    format!("{}.{}", stem, extension)
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn save(&self, folder: &str, image: DecodedImage) -> MediaResult<String> {
        let relative = format!("{}/{}", folder, random_file_name(image.extension));
        let target = self.resolve(&relative)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &image.bytes).await?;

        debug!(path = %relative, bytes = image.bytes.len(), "Stored media file");

        Ok(relative)
    }

    async fn delete(&self, path: &str) -> MediaResult<()> {
        let target = self.resolve(path)?;

        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                debug!(path = %path, "Removed media file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn url(&self, path: &str) -> String {
        media_url(&self.public_url, path)
    }
}
