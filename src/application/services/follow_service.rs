//! Subscriptions between users.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{FollowedAuthor, RecipeSummary, Subscription};
use crate::domain::repositories::{FollowRepository, RecipeRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;

/// Service for following authors and listing subscriptions.
pub struct FollowService<F: FollowRepository, U: UserRepository, R: RecipeRepository> {
    follow_repository: Arc<F>,
    user_repository: Arc<U>,
    recipe_repository: Arc<R>,
}

impl<F: FollowRepository, U: UserRepository, R: RecipeRepository> FollowService<F, U, R> {
    /// Creates a new follow service.
    pub fn new(follow_repository: Arc<F>, user_repository: Arc<U>, recipe_repository: Arc<R>) -> Self {
        Self {
            follow_repository,
            user_repository,
            recipe_repository,
        }
    }

    /// Subscribes `user_id` to `author_id` and returns the new subscription
    /// with up to `recipes_limit` recent recipes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    /// Returns [`AppError::Validation`] if a user tries to follow themselves.
    /// Returns [`AppError::Conflict`] if the subscription already exists.
    pub async fn subscribe(
        &self,
        user_id: i64,
        author_id: i64,
        recipes_limit: i64,
    ) -> Result<Subscription, AppError> {
        let author = self
            .user_repository
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": author_id })))?;

        if user_id == author_id {
            return Err(AppError::field("author", "You cannot subscribe to yourself"));
        }

        if self.follow_repository.exists(user_id, author_id).await? {
            return Err(AppError::conflict(
                "You are already subscribed to this user",
                json!({ "author_id": author_id }),
            ));
        }

        self.follow_repository.create(user_id, author_id).await?;

        tracing::info!(user_id, author_id, "Subscribed");

        let recipes_count = self.recipe_repository.count_by_author(author_id).await?;
        let mut subscriptions = self
            .attach_recipes(
                vec![FollowedAuthor {
                    author,
                    recipes_count,
                }],
                recipes_limit,
            )
            .await?;

        subscriptions
            .pop()
            .ok_or_else(|| AppError::internal("Subscription vanished", json!({})))
    }

    /// Removes a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    /// Returns [`AppError::Validation`] if there was no subscription.
    pub async fn unsubscribe(&self, user_id: i64, author_id: i64) -> Result<(), AppError> {
        if self.user_repository.find_by_id(author_id).await?.is_none() {
            return Err(AppError::not_found(
                "User not found",
                json!({ "id": author_id }),
            ));
        }

        if !self.follow_repository.delete(user_id, author_id).await? {
            return Err(AppError::bad_request(
                "You are not subscribed to this user",
                json!({ "author_id": author_id }),
            ));
        }

        tracing::info!(user_id, author_id, "Unsubscribed");

        Ok(())
    }

    /// Lists followed authors ordered by username, with the total count.
    pub async fn subscriptions(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
        recipes_limit: i64,
    ) -> Result<(Vec<Subscription>, i64), AppError> {
        let followed = self
            .follow_repository
            .list_followed(user_id, offset, limit)
            .await?;
        let total = self.follow_repository.count_followed(user_id).await?;

        let subscriptions = self.attach_recipes(followed, recipes_limit).await?;

        Ok((subscriptions, total))
    }

    async fn attach_recipes(
        &self,
        followed: Vec<FollowedAuthor>,
        recipes_limit: i64,
    ) -> Result<Vec<Subscription>, AppError> {
        let author_ids: Vec<i64> = followed.iter().map(|f| f.author.id).collect();

        let mut recipes: HashMap<i64, Vec<RecipeSummary>> = HashMap::new();
        for (author_id, recipe) in self
            .recipe_repository
            .latest_by_authors(&author_ids, recipes_limit)
            .await?
        {
            recipes.entry(author_id).or_default().push(recipe);
        }

        Ok(followed
            .into_iter()
            .map(|f| Subscription {
                recipes: recipes.remove(&f.author.id).unwrap_or_default(),
                author: f.author,
                recipes_count: f.recipes_count,
            })
            .collect())
    }
}
