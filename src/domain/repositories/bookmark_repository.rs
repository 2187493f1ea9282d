//! Repository trait for favorites and the shopping cart.

use crate::domain::entities::{BookmarkKind, ShoppingListItem};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for per-user recipe collections.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookmarkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_bookmark.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Adds a recipe to the user's collection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the pair already exists.
    async fn add(&self, kind: BookmarkKind, user_id: i64, recipe_id: i64) -> Result<(), AppError>;

    /// Removes a recipe from the user's collection.
    ///
    /// Returns `Ok(false)` if the pair did not exist.
    async fn remove(
        &self,
        kind: BookmarkKind,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError>;

    async fn exists(
        &self,
        kind: BookmarkKind,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError>;

    /// Aggregates the ingredients of every recipe in the user's shopping cart.
    ///
    /// Ingredient lines are grouped by (name, unit) with amounts summed, and
    /// ordered by name then unit.
    async fn shopping_list(&self, user_id: i64) -> Result<Vec<ShoppingListItem>, AppError>;
}
