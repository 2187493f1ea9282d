//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Login tokens
//! - [`services::user_service::UserService`] - Registration, profiles, passwords, avatars
//! - [`services::follow_service::FollowService`] - Subscriptions between users
//! - [`services::tag_service::TagService`] - Recipe tags
//! - [`services::ingredient_service::IngredientService`] - Ingredient catalogue
//! - [`services::recipe_service::RecipeService`] - Recipe publishing and listing
//! - [`services::bookmark_service::BookmarkService`] - Favorites, cart and shopping list

pub mod services;
