//! Favorites, shopping cart and the shopping list export.

use std::sync::Arc;

use crate::domain::entities::shopping_list::render_shopping_list;
use crate::domain::entities::{BookmarkKind, RecipeSummary};
use crate::domain::repositories::{BookmarkRepository, RecipeRepository};
use crate::error::AppError;
use serde_json::json;

/// Service for per-user recipe collections.
pub struct BookmarkService<B: BookmarkRepository, R: RecipeRepository> {
    bookmark_repository: Arc<B>,
    recipe_repository: Arc<R>,
}

impl<B: BookmarkRepository, R: RecipeRepository> BookmarkService<B, R> {
    /// Creates a new bookmark service.
    pub fn new(bookmark_repository: Arc<B>, recipe_repository: Arc<R>) -> Self {
        Self {
            bookmark_repository,
            recipe_repository,
        }
    }

    /// Adds a recipe to a collection and returns its short representation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    /// Returns [`AppError::Conflict`] if it is already in the collection.
    pub async fn add(
        &self,
        kind: BookmarkKind,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<RecipeSummary, AppError> {
        let recipe = self.find_recipe(recipe_id).await?;

        if self
            .bookmark_repository
            .exists(kind, user_id, recipe_id)
            .await?
        {
            return Err(AppError::conflict(
                format!("\"{}\" is already in {}", recipe.name, kind),
                json!({ "recipe_id": recipe_id }),
            ));
        }

        self.bookmark_repository
            .add(kind, user_id, recipe_id)
            .await?;

        tracing::debug!(user_id, recipe_id, collection = %kind, "Recipe bookmarked");

        Ok(recipe)
    }

    /// Removes a recipe from a collection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    /// Returns [`AppError::Validation`] if it was not in the collection.
    pub async fn remove(
        &self,
        kind: BookmarkKind,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<(), AppError> {
        self.find_recipe(recipe_id).await?;

        if !self
            .bookmark_repository
            .remove(kind, user_id, recipe_id)
            .await?
        {
            return Err(AppError::bad_request(
                format!("Recipe is not in {}", kind),
                json!({ "recipe_id": recipe_id }),
            ));
        }

        tracing::debug!(user_id, recipe_id, collection = %kind, "Recipe unbookmarked");

        Ok(())
    }

    /// Renders the user's aggregated shopping list as plain text.
    pub async fn shopping_list(&self, user_id: i64) -> Result<String, AppError> {
        let items = self.bookmark_repository.shopping_list(user_id).await?;

        tracing::debug!(user_id, lines = items.len(), "Shopping list exported");

        Ok(render_shopping_list(&items))
    }

    async fn find_recipe(&self, recipe_id: i64) -> Result<RecipeSummary, AppError> {
        self.recipe_repository
            .find_summary(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe not found", json!({ "id": recipe_id })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShoppingListItem;
    use crate::domain::repositories::{MockBookmarkRepository, MockRecipeRepository};

    fn summary(id: i64) -> RecipeSummary {
        RecipeSummary {
            id,
            name: "Borscht".to_string(),
            image: "recipes/images/b.png".to_string(),
            cooking_time: 90,
        }
    }

    fn service(
        bookmarks: MockBookmarkRepository,
        recipes: MockRecipeRepository,
    ) -> BookmarkService<MockBookmarkRepository, MockRecipeRepository> {
        BookmarkService::new(Arc::new(bookmarks), Arc::new(recipes))
    }

    #[tokio::test]
    async fn test_add_favorite() {
        let mut bookmarks = MockBookmarkRepository::new();
        let mut recipes = MockRecipeRepository::new();

        recipes
            .expect_find_summary()
            .returning(|id| Ok(Some(summary(id))));
        bookmarks.expect_exists().returning(|_, _, _| Ok(false));
        bookmarks
            .expect_add()
            .withf(|kind, user_id, recipe_id| {
                *kind == BookmarkKind::Favorite && *user_id == 1 && *recipe_id == 3
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let added = service(bookmarks, recipes)
            .add(BookmarkKind::Favorite, 1, 3)
            .await
            .unwrap();

        assert_eq!(added, summary(3));
    }

    #[tokio::test]
    async fn test_add_twice_is_conflict() {
        let mut bookmarks = MockBookmarkRepository::new();
        let mut recipes = MockRecipeRepository::new();

        recipes
            .expect_find_summary()
            .returning(|id| Ok(Some(summary(id))));
        bookmarks.expect_exists().returning(|_, _, _| Ok(true));
        bookmarks.expect_add().times(0);

        let result = service(bookmarks, recipes)
            .add(BookmarkKind::Favorite, 1, 3)
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_add_unknown_recipe() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_find_summary().returning(|_| Ok(None));

        let result = service(MockBookmarkRepository::new(), recipes)
            .add(BookmarkKind::ShoppingCart, 1, 999)
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_missing_pair_is_bad_request() {
        let mut bookmarks = MockBookmarkRepository::new();
        let mut recipes = MockRecipeRepository::new();

        recipes
            .expect_find_summary()
            .returning(|id| Ok(Some(summary(id))));
        bookmarks.expect_remove().returning(|_, _, _| Ok(false));

        let result = service(bookmarks, recipes)
            .remove(BookmarkKind::ShoppingCart, 1, 3)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_shopping_list_renders_items() {
        let mut bookmarks = MockBookmarkRepository::new();
        bookmarks.expect_shopping_list().returning(|_| {
            Ok(vec![
                ShoppingListItem::new("Flour", "g", 300),
                ShoppingListItem::new("Sugar", "g", 150),
            ])
        });

        let text = service(bookmarks, MockRecipeRepository::new())
            .shopping_list(1)
            .await
            .unwrap();

        assert_eq!(text, "Shopping list\nFlour - 300 (g)\nSugar - 150 (g)\n");
    }

    #[tokio::test]
    async fn test_empty_shopping_list_is_header_only() {
        let mut bookmarks = MockBookmarkRepository::new();
        bookmarks.expect_shopping_list().returning(|_| Ok(vec![]));

        let text = service(bookmarks, MockRecipeRepository::new())
            .shopping_list(1)
            .await
            .unwrap();

        assert_eq!(text, "Shopping list\n");
    }
}
