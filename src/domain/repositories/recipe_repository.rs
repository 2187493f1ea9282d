//! Repository trait for recipes.

use crate::domain::entities::{NewRecipe, Recipe, RecipeFilter, RecipeOwner, RecipePatch, RecipeSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recipes and their tag/ingredient associations.
///
/// Writes that touch several tables run in a single transaction: either the
/// recipe and all its associations are stored, or nothing is.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRecipeRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_recipe.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Inserts a recipe with its tags and ingredient lines.
    ///
    /// Returns the new recipe id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a referenced tag or ingredient
    /// vanished between validation and insert.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_recipe: NewRecipe) -> Result<i64, AppError>;

    /// Updates scalar fields and replaces tags and ingredient lines.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    async fn update(&self, id: i64, patch: RecipePatch) -> Result<(), AppError>;

    /// Deletes a recipe and, by cascade, its associations.
    ///
    /// Returns `Ok(true)` if a row was deleted.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Loads a fully hydrated recipe as seen by `viewer_id`.
    async fn find_by_id(&self, id: i64, viewer_id: Option<i64>)
    -> Result<Option<Recipe>, AppError>;

    async fn find_summary(&self, id: i64) -> Result<Option<RecipeSummary>, AppError>;

    async fn find_owner(&self, id: i64) -> Result<Option<RecipeOwner>, AppError>;

    /// Lists recipes, newest first, matching `filter`.
    async fn list(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, AppError>;

    /// Counts recipes matching `filter`, ignoring its offset and limit.
    async fn count(&self, filter: &RecipeFilter) -> Result<i64, AppError>;

    /// Returns up to `per_author` most recent recipes of each author as
    /// `(author_id, recipe)` pairs.
    async fn latest_by_authors(
        &self,
        author_ids: &[i64],
        per_author: i64,
    ) -> Result<Vec<(i64, RecipeSummary)>, AppError>;

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError>;
}
