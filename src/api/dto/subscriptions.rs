//! DTOs for subscriptions to other users.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

use super::MediaUrl;
use super::pagination::PaginationParams;
use super::recipes::ShortRecipeResponse;
use super::users::UserResponse;
use crate::domain::entities::Subscription;
use crate::domain::entities::subscription::DEFAULT_RECIPES_LIMIT;

/// Query parameters for subscription endpoints.
///
/// A missing, non-numeric or negative `recipes_limit` falls back to
/// [`DEFAULT_RECIPES_LIMIT`].
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub recipes_limit: Option<i64>,
}

impl SubscriptionParams {
    pub fn recipes_limit(&self) -> i64 {
        match self.recipes_limit {
            Some(limit) if limit >= 0 => limit,
            _ => DEFAULT_RECIPES_LIMIT,
        }
    }
}

/// A followed author with recipe previews.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<ShortRecipeResponse>,
    pub recipes_count: i64,
}

impl SubscriptionResponse {
    pub fn new(subscription: Subscription, media_url: MediaUrl<'_>) -> Self {
        Self {
            user: UserResponse::new(subscription.author, true, media_url),
            recipes: subscription
                .recipes
                .into_iter()
                .map(|recipe| ShortRecipeResponse::new(recipe, media_url))
                .collect(),
            recipes_count: subscription.recipes_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{RecipeSummary, User};
    use chrono::Utc;

    fn parse(query: &str) -> SubscriptionParams {
        serde_json::from_str(query).unwrap()
    }

    #[test]
    fn test_recipes_limit_default() {
        assert_eq!(parse("{}").recipes_limit(), DEFAULT_RECIPES_LIMIT);
    }

    #[test]
    fn test_recipes_limit_explicit() {
        assert_eq!(parse(r#"{"recipes_limit": "1"}"#).recipes_limit(), 1);
    }

    #[test]
    fn test_non_numeric_recipes_limit_falls_back() {
        assert_eq!(
            parse(r#"{"recipes_limit": "lots"}"#).recipes_limit(),
            DEFAULT_RECIPES_LIMIT
        );
    }

    #[test]
    fn test_negative_recipes_limit_falls_back() {
        assert_eq!(
            parse(r#"{"recipes_limit": "-2"}"#).recipes_limit(),
            DEFAULT_RECIPES_LIMIT
        );
    }

    #[test]
    fn test_response_flattens_user() {
        let subscription = Subscription {
            author: User::new(
                4,
                "author@example.com".to_string(),
                "author".to_string(),
                "A".to_string(),
                "B".to_string(),
                None,
                Utc::now(),
            ),
            recipes: vec![RecipeSummary {
                id: 1,
                name: "Soup".to_string(),
                image: "recipes/images/s.png".to_string(),
                cooking_time: 30,
            }],
            recipes_count: 5,
        };
        let to_url = |path: &str| format!("/media/{path}");

        let json = serde_json::to_value(SubscriptionResponse::new(subscription, &to_url)).unwrap();

        assert_eq!(json["username"], "author");
        assert_eq!(json["is_subscribed"], true);
        assert_eq!(json["recipes_count"], 5);
        assert_eq!(json["recipes"][0]["image"], "/media/recipes/images/s.png");
    }
}
