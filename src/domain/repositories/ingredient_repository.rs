//! Repository trait for ingredients.

use crate::domain::entities::{Ingredient, NewIngredient};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the ingredient catalogue.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgIngredientRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_ingredient.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Lists ingredients ordered by name.
    ///
    /// When `name_prefix` is set, only ingredients whose name starts with it
    /// (case-insensitively) are returned.
    async fn search(&self, name_prefix: Option<String>) -> Result<Vec<Ingredient>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError>;

    /// Returns the ids from `ids` that do not reference an existing ingredient.
    async fn find_missing(&self, ids: &[i64]) -> Result<Vec<i64>, AppError>;

    /// Inserts ingredients, skipping (name, unit) pairs that already exist.
    ///
    /// Returns the number of rows actually inserted.
    async fn bulk_insert(&self, ingredients: Vec<NewIngredient>) -> Result<u64, AppError>;
}
