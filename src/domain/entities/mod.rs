//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures; persistence rows are mapped into them
//! by the infrastructure layer.
//!
//! # Entity Types
//!
//! - [`User`] / [`UserProfile`] - Registered users, optionally seen by a viewer
//! - [`Tag`] - Recipe categories
//! - [`Ingredient`] - Ingredients with measurement units
//! - [`Recipe`] - Recipes with their tags and ingredient lines
//! - [`BookmarkKind`] - Favorites and shopping cart collections
//! - [`Subscription`] - Followed authors with recipe previews
//! - [`ShoppingListItem`] - Aggregated shopping cart lines
//!
//! # Design Pattern
//!
//! Separate structs are used for writes:
//! - `NewUser`, `NewTag`, `NewIngredient`, `NewRecipe` - For creating records
//! - `RecipePatch` - For replacing a recipe's content

pub mod bookmark;
pub mod ingredient;
pub mod recipe;
pub mod shopping_list;
pub mod subscription;
pub mod tag;
pub mod user;

pub use bookmark::BookmarkKind;
pub use ingredient::{Ingredient, NewIngredient};
pub use recipe::{
    IngredientAmount, NewRecipe, Recipe, RecipeFilter, RecipeIngredient, RecipePatch,
    RecipeOwner, RecipeSummary,
};
pub use shopping_list::ShoppingListItem;
pub use subscription::{FollowedAuthor, Subscription};
pub use tag::{NewTag, Tag};
pub use user::{NewUser, User, UserCredentials, UserProfile};
