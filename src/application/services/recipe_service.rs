//! Recipe publishing, editing and listing.

use std::sync::Arc;

use crate::domain::entities::recipe::find_duplicates;
use crate::domain::entities::{
    IngredientAmount, NewRecipe, Recipe, RecipeFilter, RecipeOwner, RecipePatch,
};
use crate::domain::repositories::{IngredientRepository, RecipeRepository, TagRepository};
use crate::error::AppError;
use crate::infrastructure::media::{MediaStorage, RECIPE_IMAGES_FOLDER};
use crate::utils::base64_image::{DecodedImage, decode_data_uri};
use serde_json::{Map, Value, json};

/// A new recipe as submitted by its author, after field validation.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Image as a base64 data URI.
    pub image: String,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Changes to an existing recipe. Tags and ingredients are always required
/// and replace the previous sets.
#[derive(Debug, Clone)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    /// New image as a base64 data URI.
    pub image: Option<String>,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Service for recipes.
///
/// Every check runs before the first write: association rules, referenced
/// ids and the image payload. Only then is the image stored and the recipe
/// written in one transaction.
pub struct RecipeService<R: RecipeRepository, T: TagRepository, I: IngredientRepository> {
    recipe_repository: Arc<R>,
    tag_repository: Arc<T>,
    ingredient_repository: Arc<I>,
    media: Arc<dyn MediaStorage>,
}

impl<R: RecipeRepository, T: TagRepository, I: IngredientRepository> RecipeService<R, T, I> {
    /// Creates a new recipe service.
    pub fn new(
        recipe_repository: Arc<R>,
        tag_repository: Arc<T>,
        ingredient_repository: Arc<I>,
        media: Arc<dyn MediaStorage>,
    ) -> Self {
        Self {
            recipe_repository,
            tag_repository,
            ingredient_repository,
            media,
        }
    }

    /// Publishes a recipe for `author_id` and returns it as the author sees it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] keyed by field if tags or ingredients
    /// are empty, duplicated or unknown, or the image is invalid.
    pub async fn create(&self, author_id: i64, draft: RecipeDraft) -> Result<Recipe, AppError> {
        self.validate_associations(&draft.tags, &draft.ingredients)
            .await?;
        let image = decode_data_uri("image", &draft.image)?;

        let image_path = self.media.save(RECIPE_IMAGES_FOLDER, image).await?;

        let created = self
            .recipe_repository
            .create(NewRecipe {
                author_id,
                name: draft.name,
                text: draft.text,
                cooking_time: draft.cooking_time,
                image: image_path.clone(),
                tags: draft.tags,
                ingredients: draft.ingredients,
            })
            .await;

        let id = match created {
            Ok(id) => id,
            Err(e) => {
                self.discard_file(&image_path).await;
                return Err(e);
            }
        };

        tracing::info!(recipe_id = id, author_id, "Recipe created");

        self.get(id, Some(author_id)).await
    }

    /// Applies `changes` to a recipe owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    /// Returns [`AppError::Forbidden`] if `user_id` is not the author.
    /// Returns [`AppError::Validation`] as for [`Self::create`].
    pub async fn update(
        &self,
        user_id: i64,
        id: i64,
        changes: RecipeChanges,
    ) -> Result<Recipe, AppError> {
        let owner = self.authorize(user_id, id).await?;

        self.validate_associations(&changes.tags, &changes.ingredients)
            .await?;
        let image: Option<DecodedImage> = changes
            .image
            .as_deref()
            .map(|data_uri| decode_data_uri("image", data_uri))
            .transpose()?;

        let new_image_path = match image {
            Some(image) => Some(self.media.save(RECIPE_IMAGES_FOLDER, image).await?),
            None => None,
        };

        let updated = self
            .recipe_repository
            .update(
                id,
                RecipePatch {
                    name: changes.name,
                    text: changes.text,
                    cooking_time: changes.cooking_time,
                    image: new_image_path.clone(),
                    tags: changes.tags,
                    ingredients: changes.ingredients,
                },
            )
            .await;

        match (updated, new_image_path) {
            (Err(e), Some(path)) => {
                self.discard_file(&path).await;
                return Err(e);
            }
            (Err(e), None) => return Err(e),
            (Ok(()), Some(_)) => self.discard_file(&owner.image).await,
            (Ok(()), None) => {}
        }

        tracing::info!(recipe_id = id, user_id, "Recipe updated");

        self.get(id, Some(user_id)).await
    }

    /// Deletes a recipe owned by `user_id` and removes its image.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    /// Returns [`AppError::Forbidden`] if `user_id` is not the author.
    pub async fn delete(&self, user_id: i64, id: i64) -> Result<(), AppError> {
        let owner = self.authorize(user_id, id).await?;

        if !self.recipe_repository.delete(id).await? {
            return Err(recipe_not_found(id));
        }

        self.discard_file(&owner.image).await;

        tracing::info!(recipe_id = id, user_id, "Recipe deleted");

        Ok(())
    }

    /// Returns a recipe as seen by `viewer_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    pub async fn get(&self, id: i64, viewer_id: Option<i64>) -> Result<Recipe, AppError> {
        self.recipe_repository
            .find_by_id(id, viewer_id)
            .await?
            .ok_or_else(|| recipe_not_found(id))
    }

    /// Lists recipes matching `filter`, with the total count.
    ///
    /// Viewer-relative filters are ignored for anonymous viewers.
    pub async fn list(&self, mut filter: RecipeFilter) -> Result<(Vec<Recipe>, i64), AppError> {
        if filter.viewer_id.is_none() {
            filter.only_favorited = false;
            filter.only_in_shopping_cart = false;
        }

        let recipes = self.recipe_repository.list(&filter).await?;
        let total = self.recipe_repository.count(&filter).await?;

        Ok((recipes, total))
    }

    /// Fails with [`AppError::NotFound`] unless the recipe exists.
    pub async fn ensure_exists(&self, id: i64) -> Result<(), AppError> {
        self.recipe_repository
            .find_summary(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| recipe_not_found(id))
    }

    /// Absolute URL of a stored media path.
    pub fn media_url(&self, path: &str) -> String {
        self.media.url(path)
    }

    async fn authorize(&self, user_id: i64, id: i64) -> Result<RecipeOwner, AppError> {
        let owner = self
            .recipe_repository
            .find_owner(id)
            .await?
            .ok_or_else(|| recipe_not_found(id))?;

        if owner.author_id != user_id {
            return Err(AppError::forbidden(
                "Only the author can change this recipe",
                json!({ "id": id }),
            ));
        }

        Ok(owner)
    }

    /// Checks tag and ingredient references, collecting every problem per field.
    async fn validate_associations(
        &self,
        tags: &[i64],
        ingredients: &[IngredientAmount],
    ) -> Result<(), AppError> {
        let mut errors = Map::new();

        if tags.is_empty() {
            errors.insert("tags".into(), json!(["Add at least one tag"]));
        } else {
            let duplicates = find_duplicates(tags.iter().copied());
            if !duplicates.is_empty() {
                errors.insert("tags".into(), json!([format!("Duplicate tags: {:?}", duplicates)]));
            } else {
                let missing = self.tag_repository.find_missing(tags).await?;
                if !missing.is_empty() {
                    errors.insert("tags".into(), itemized_missing("Tag", &missing));
                }
            }
        }

        let ingredient_ids: Vec<i64> = ingredients.iter().map(|i| i.ingredient_id).collect();
        if ingredient_ids.is_empty() {
            errors.insert(
                "ingredients".into(),
                json!(["Add at least one ingredient"]),
            );
        } else {
            let duplicates = find_duplicates(ingredient_ids.iter().copied());
            if !duplicates.is_empty() {
                errors.insert(
                    "ingredients".into(),
                    json!([format!("Duplicate ingredients: {:?}", duplicates)]),
                );
            } else {
                let missing = self
                    .ingredient_repository
                    .find_missing(&ingredient_ids)
                    .await?;
                if !missing.is_empty() {
                    errors.insert(
                        "ingredients".into(),
                        itemized_missing("Ingredient", &missing),
                    );
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::bad_request(
                "Validation failed",
                Value::Object(errors),
            ))
        }
    }

    async fn discard_file(&self, path: &str) {
        if let Err(e) = self.media.delete(path).await {
            tracing::warn!(error = %e, path, "Failed to remove media file");
        }
    }
}

fn recipe_not_found(id: i64) -> AppError {
    AppError::not_found("Recipe not found", json!({ "id": id }))
}

fn itemized_missing(kind: &str, ids: &[i64]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| Value::String(format!("{} with id {} does not exist", kind, id)))
            .collect(),
    )
}
