//! Ingredient catalogue lookup and loading.

use std::sync::Arc;

use crate::domain::entities::{Ingredient, NewIngredient};
use crate::domain::repositories::IngredientRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for the ingredient catalogue.
pub struct IngredientService<I: IngredientRepository> {
    repository: Arc<I>,
}

impl<I: IngredientRepository> IngredientService<I> {
    /// Creates a new ingredient service.
    pub fn new(repository: Arc<I>) -> Self {
        Self { repository }
    }

    /// Lists ingredients, optionally filtered by a case-insensitive name prefix.
    ///
    /// A blank prefix is treated as no filter.
    pub async fn search(&self, name: Option<&str>) -> Result<Vec<Ingredient>, AppError> {
        let prefix = name
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
            .map(str::to_string);

        self.repository.search(prefix).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the ingredient does not exist.
    pub async fn get(&self, id: i64) -> Result<Ingredient, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Ingredient not found", json!({ "id": id })))
    }

    /// Inserts ingredients, skipping ones already in the catalogue.
    ///
    /// Returns the number actually inserted.
    pub async fn load(&self, ingredients: Vec<NewIngredient>) -> Result<u64, AppError> {
        let submitted = ingredients.len();
        let inserted = self.repository.bulk_insert(ingredients).await?;

        tracing::info!(submitted, inserted, "Ingredients loaded");

        Ok(inserted)
    }
}
