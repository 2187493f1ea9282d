//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User accounts and profiles
//! - [`PgTokenRepository`] - Login token storage and lookup
//! - [`PgTagRepository`] - Recipe tags
//! - [`PgIngredientRepository`] - Ingredient catalogue and bulk loading
//! - [`PgRecipeRepository`] - Recipes with tags and ingredient lines
//! - [`PgBookmarkRepository`] - Favorites, shopping cart and shopping list aggregation
//! - [`PgFollowRepository`] - Subscriptions between users

pub mod pg_bookmark_repository;
pub mod pg_follow_repository;
pub mod pg_ingredient_repository;
pub mod pg_recipe_repository;
pub mod pg_tag_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_bookmark_repository::PgBookmarkRepository;
pub use pg_follow_repository::PgFollowRepository;
pub use pg_ingredient_repository::PgIngredientRepository;
pub use pg_recipe_repository::PgRecipeRepository;
pub use pg_tag_repository::PgTagRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
