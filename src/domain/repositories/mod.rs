//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - User accounts and profiles
//! - [`TokenRepository`] - Login token storage
//! - [`TagRepository`] - Recipe tags
//! - [`IngredientRepository`] - Ingredient catalogue
//! - [`RecipeRepository`] - Recipes and their associations
//! - [`BookmarkRepository`] - Favorites, shopping cart and shopping list
//! - [`FollowRepository`] - Subscriptions between users
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod bookmark_repository;
pub mod follow_repository;
pub mod ingredient_repository;
pub mod recipe_repository;
pub mod tag_repository;
pub mod token_repository;
pub mod user_repository;

pub use bookmark_repository::BookmarkRepository;
pub use follow_repository::FollowRepository;
pub use ingredient_repository::IngredientRepository;
pub use recipe_repository::RecipeRepository;
pub use tag_repository::TagRepository;
pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use bookmark_repository::MockBookmarkRepository;
#[cfg(test)]
pub use follow_repository::MockFollowRepository;
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
