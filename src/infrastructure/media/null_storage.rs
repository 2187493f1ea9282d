//! No-op media storage for testing.

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use super::service::{MediaResult, MediaStorage, media_url};
use crate::utils::base64_image::DecodedImage;

/// A media storage that accepts every write without persisting anything.
///
/// Returned paths are well-formed, so URLs built from them look like the
/// real thing. Used by integration tests that don't care about files on disk.
pub struct NullMediaStorage {
    public_url: String,
}

impl NullMediaStorage {
    /// Creates a new NullMediaStorage instance.
    pub fn new(public_url: impl Into<String>) -> Self {
        debug!("Using NullMediaStorage (uploads are discarded)");
        Self {
            public_url: public_url.into(),
        }
    }
}

#[async_trait]
impl MediaStorage for NullMediaStorage {
    async fn save(&self, folder: &str, image: DecodedImage) -> MediaResult<String> {
        let id: u64 = rand::rng().random();
        Ok(format!("{}/{:016x}.{}", folder, id, image.extension))
    }

    async fn delete(&self, _path: &str) -> MediaResult<()> {
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        media_url(&self.public_url, path)
    }
}
