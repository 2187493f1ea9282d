//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod bookmarks;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod redirect;
pub mod subscriptions;
pub mod tags;
pub mod users;

pub use auth::{login_handler, logout_handler};
pub use bookmarks::{
    add_favorite_handler, add_to_cart_handler, download_shopping_cart_handler,
    remove_favorite_handler, remove_from_cart_handler,
};
pub use health::health_handler;
pub use ingredients::{get_ingredient_handler, list_ingredients_handler};
pub use recipes::{
    create_recipe_handler, delete_recipe_handler, get_link_handler, get_recipe_handler,
    list_recipes_handler, update_recipe_handler,
};
pub use redirect::redirect_handler;
pub use subscriptions::{subscribe_handler, subscriptions_handler, unsubscribe_handler};
pub use tags::{get_tag_handler, list_tags_handler};
pub use users::{
    delete_avatar_handler, get_user_handler, list_users_handler, me_handler,
    register_handler, set_avatar_handler, set_password_handler,
};
