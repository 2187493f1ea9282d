//! DTOs for tags.

use serde::Serialize;

use crate::domain::entities::Tag;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        }
    }
}
