//! Follow relationship between two users, as returned to the follower.

use super::recipe::RecipeSummary;
use super::user::User;

/// Number of recent recipes shown per followed author when the client does
/// not ask for a specific `recipes_limit`.
pub const DEFAULT_RECIPES_LIMIT: i64 = 3;

/// A followed author with their latest recipes.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub author: User,
    /// Most recent recipes first, truncated to the requested limit.
    pub recipes: Vec<RecipeSummary>,
    /// Total number of recipes the author has published.
    pub recipes_count: i64,
}

/// A followed author with the total count of their recipes, before the
/// recipe previews are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowedAuthor {
    pub author: User,
    pub recipes_count: i64,
}
