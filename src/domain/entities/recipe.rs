//! Recipe entity, its ingredient lines and the inputs used to write them.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use super::tag::Tag;
use super::user::UserProfile;

pub const RECIPE_NAME_MAX_LENGTH: u64 = 256;
pub const COOKING_TIME_MIN: i32 = 1;
pub const COOKING_TIME_MAX: i32 = 32_000;
pub const INGREDIENT_AMOUNT_MIN: i32 = 1;
pub const INGREDIENT_AMOUNT_MAX: i32 = 32_000;

/// A fully hydrated recipe as seen by a particular viewer.
///
/// `is_favorited` and `is_in_shopping_cart` are relative to the viewer and are
/// always `false` for anonymous requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Storage path of the recipe image.
    pub image: String,
    pub author: UserProfile,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub pub_date: DateTime<Utc>,
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    /// Ingredient id (not the id of the join row).
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Compact recipe representation used in favorites, cart and subscriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// Ownership data needed to authorize and clean up recipe writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeOwner {
    pub author_id: i64,
    pub image: String,
}

/// Ingredient reference with amount, as submitted by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i64,
    pub amount: i32,
}

/// Input data for inserting a recipe together with its associations.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub author_id: i64,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Update of an existing recipe.
///
/// Scalar fields left as `None` are unchanged. Tags and ingredients always
/// replace the previous sets entirely.
#[derive(Debug, Clone)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Filters and paging for recipe listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    /// User the flags are computed for.
    pub viewer_id: Option<i64>,
    pub author_id: Option<i64>,
    /// Tag slugs; a recipe matches if it carries any of them.
    pub tags: Vec<String>,
    pub only_favorited: bool,
    pub only_in_shopping_cart: bool,
    pub offset: i64,
    pub limit: i64,
}

/// Returns the ids that appear more than once, in order of first repetition.
pub fn find_duplicates(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for id in ids {
        if !seen.insert(id) && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_duplicates_none() {
        assert!(find_duplicates([1, 2, 3]).is_empty());
    }

    #[test]
    fn test_find_duplicates_reports_each_once() {
        assert_eq!(find_duplicates([4, 1, 4, 2, 4, 1]), vec![4, 1]);
    }

    #[test]
    fn test_recipe_filter_default_is_unfiltered() {
        let filter = RecipeFilter::default();

        assert!(filter.viewer_id.is_none());
        assert!(filter.tags.is_empty());
        assert!(!filter.only_favorited);
        assert!(!filter.only_in_shopping_cart);
    }
}
