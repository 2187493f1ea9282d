//! Business logic services for the application layer.

pub mod auth_service;
pub mod bookmark_service;
pub mod follow_service;
pub mod ingredient_service;
pub mod recipe_service;
pub mod tag_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use bookmark_service::BookmarkService;
pub use follow_service::FollowService;
pub use ingredient_service::IngredientService;
pub use recipe_service::{RecipeChanges, RecipeDraft, RecipeService};
pub use tag_service::TagService;
pub use user_service::{Registration, UserService};
