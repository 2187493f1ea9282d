//! API route configuration.
//!
//! Every route passes through [`crate::api::middleware::auth`], which
//! resolves an optional bearer token. Handlers that need an identity take
//! [`crate::api::middleware::CurrentUser`] and reject anonymous callers.

use crate::api::handlers::{
    add_favorite_handler, add_to_cart_handler, create_recipe_handler, delete_avatar_handler,
    delete_recipe_handler, download_shopping_cart_handler, get_ingredient_handler,
    get_link_handler, get_recipe_handler, get_tag_handler, get_user_handler,
    list_ingredients_handler, list_recipes_handler, list_tags_handler, list_users_handler,
    login_handler, logout_handler, me_handler, register_handler, remove_favorite_handler,
    remove_from_cart_handler, set_avatar_handler, set_password_handler, subscribe_handler,
    subscriptions_handler, unsubscribe_handler, update_recipe_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Token login, kept separate so it can carry its own rate limit.
///
/// - `POST /auth/token/login` - Exchange credentials for a token
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/auth/token/login", post(login_handler))
}

/// All other API routes.
///
/// # Endpoints
///
/// - `POST   /auth/token/logout`              - Revoke the caller's token
/// - `GET    /users`                          - List users (paginated)
/// - `POST   /users`                          - Register
/// - `GET    /users/me`                       - Current user
/// - `PUT    /users/me/avatar`                - Upload avatar
/// - `DELETE /users/me/avatar`                - Remove avatar
/// - `POST   /users/set_password`             - Change password
/// - `GET    /users/subscriptions`            - Followed authors (paginated)
/// - `GET    /users/{id}`                     - User profile
/// - `POST   /users/{id}/subscribe`           - Follow
/// - `DELETE /users/{id}/subscribe`           - Unfollow
/// - `GET    /tags`, `/tags/{id}`             - Tags
/// - `GET    /ingredients`, `/ingredients/{id}` - Ingredients, `?name=` prefix search
/// - `GET    /recipes`                        - List recipes (paginated, filtered)
/// - `POST   /recipes`                        - Create a recipe
/// - `GET    /recipes/download_shopping_cart` - Shopping list as text
/// - `GET    /recipes/{id}`                   - Recipe detail
/// - `PATCH  /recipes/{id}`                   - Update own recipe
/// - `DELETE /recipes/{id}`                   - Delete own recipe
/// - `GET    /recipes/{id}/get-link`          - Short link
/// - `POST   /recipes/{id}/favorite`          - Add to favorites
/// - `DELETE /recipes/{id}/favorite`          - Remove from favorites
/// - `POST   /recipes/{id}/shopping_cart`     - Add to shopping cart
/// - `DELETE /recipes/{id}/shopping_cart`     - Remove from shopping cart
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/token/logout", post(logout_handler))
        .route("/users", get(list_users_handler).post(register_handler))
        .route("/users/me", get(me_handler))
        .route(
            "/users/me/avatar",
            put(set_avatar_handler).delete(delete_avatar_handler),
        )
        .route("/users/set_password", post(set_password_handler))
        .route("/users/subscriptions", get(subscriptions_handler))
        .route("/users/{id}", get(get_user_handler))
        .route(
            "/users/{id}/subscribe",
            post(subscribe_handler).delete(unsubscribe_handler),
        )
        .route("/tags", get(list_tags_handler))
        .route("/tags/{id}", get(get_tag_handler))
        .route("/ingredients", get(list_ingredients_handler))
        .route("/ingredients/{id}", get(get_ingredient_handler))
        .route(
            "/recipes",
            get(list_recipes_handler).post(create_recipe_handler),
        )
        .route(
            "/recipes/download_shopping_cart",
            get(download_shopping_cart_handler),
        )
        .route(
            "/recipes/{id}",
            get(get_recipe_handler)
                .patch(update_recipe_handler)
                .delete(delete_recipe_handler),
        )
        .route("/recipes/{id}/get-link", get(get_link_handler))
        .route(
            "/recipes/{id}/favorite",
            post(add_favorite_handler).delete(remove_favorite_handler),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(add_to_cart_handler).delete(remove_from_cart_handler),
        )
}
