//! Storage for uploaded images.
//!
//! Provides a [`MediaStorage`] trait with filesystem and no-op implementations.

pub mod local_storage;
pub mod null_storage;
pub mod service;

pub use local_storage::LocalMediaStorage;
pub use null_storage::NullMediaStorage;
pub use service::{AVATARS_FOLDER, MediaError, MediaResult, MediaStorage, RECIPE_IMAGES_FOLDER};

#[cfg(test)]
pub use service::MockMediaStorage;
