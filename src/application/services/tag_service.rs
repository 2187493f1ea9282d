//! Tag lookup and management.

use std::sync::Arc;

use crate::domain::entities::tag::{TAG_MAX_LENGTH, is_valid_slug};
use crate::domain::entities::{NewTag, Tag};
use crate::domain::repositories::TagRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for recipe tags.
pub struct TagService<T: TagRepository> {
    repository: Arc<T>,
}

impl<T: TagRepository> TagService<T> {
    /// Creates a new tag service.
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    /// Lists all tags ordered by name.
    pub async fn list(&self) -> Result<Vec<Tag>, AppError> {
        self.repository.list().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the tag does not exist.
    pub async fn get(&self, id: i64) -> Result<Tag, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found", json!({ "id": id })))
    }

    /// Creates a tag after checking name and slug constraints.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name or slug is empty, too
    /// long, or the slug has characters outside `[-a-zA-Z0-9_]`.
    /// Returns [`AppError::Conflict`] if the name or slug is taken.
    pub async fn create(&self, name: &str, slug: &str) -> Result<Tag, AppError> {
        let name = name.trim();
        let slug = slug.trim();
        let max = TAG_MAX_LENGTH as usize;

        if name.is_empty() || name.chars().count() > max {
            return Err(AppError::field(
                "name",
                format!("Name must be 1 to {} characters", max),
            ));
        }
        if !is_valid_slug(slug) || slug.chars().count() > max {
            return Err(AppError::field(
                "slug",
                format!(
                    "Slug must be 1 to {} characters of letters, digits, '-' or '_'",
                    max
                ),
            ));
        }

        let tag = self
            .repository
            .create(NewTag {
                name: name.to_string(),
                slug: slug.to_string(),
            })
            .await?;

        tracing::info!(tag_id = tag.id, slug = %tag.slug, "Tag created");

        Ok(tag)
    }
}
