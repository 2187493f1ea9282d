//! Handlers for favorites, the shopping cart and the shopping list export.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::recipes::ShortRecipeResponse;
use crate::api::extract::ValidPath;
use crate::api::middleware::CurrentUser;
use crate::domain::entities::BookmarkKind;
use crate::domain::entities::shopping_list::SHOPPING_LIST_FILENAME;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/recipes/{id}/favorite`
pub async fn add_favorite_handler(
    state: State<AppState>,
    user: CurrentUser,
    id: ValidPath<i64>,
) -> Result<(StatusCode, Json<ShortRecipeResponse>), AppError> {
    add(BookmarkKind::Favorite, state, user, id).await
}

/// `DELETE /api/recipes/{id}/favorite`
pub async fn remove_favorite_handler(
    state: State<AppState>,
    user: CurrentUser,
    id: ValidPath<i64>,
) -> Result<StatusCode, AppError> {
    remove(BookmarkKind::Favorite, state, user, id).await
}

/// `POST /api/recipes/{id}/shopping_cart`
pub async fn add_to_cart_handler(
    state: State<AppState>,
    user: CurrentUser,
    id: ValidPath<i64>,
) -> Result<(StatusCode, Json<ShortRecipeResponse>), AppError> {
    add(BookmarkKind::ShoppingCart, state, user, id).await
}

/// `DELETE /api/recipes/{id}/shopping_cart`
pub async fn remove_from_cart_handler(
    state: State<AppState>,
    user: CurrentUser,
    id: ValidPath<i64>,
) -> Result<StatusCode, AppError> {
    remove(BookmarkKind::ShoppingCart, state, user, id).await
}

/// Adds a recipe to a collection and responds 201 with its short form.
///
/// # Errors
///
/// - 404 Not Found if the recipe does not exist
/// - 409 Conflict if it is already in the collection
async fn add(
    kind: BookmarkKind,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidPath(recipe_id): ValidPath<i64>,
) -> Result<(StatusCode, Json<ShortRecipeResponse>), AppError> {
    let recipe = state
        .bookmark_service
        .add(kind, user.id, recipe_id)
        .await?;

    let media_url = |path: &str| state.recipe_service.media_url(path);
    Ok((
        StatusCode::CREATED,
        Json(ShortRecipeResponse::new(recipe, &media_url)),
    ))
}

/// Removes a recipe from a collection; 400 if it was not there.
async fn remove(
    kind: BookmarkKind,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidPath(recipe_id): ValidPath<i64>,
) -> Result<StatusCode, AppError> {
    state
        .bookmark_service
        .remove(kind, user.id, recipe_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Downloads the caller's shopping list.
///
/// # Endpoint
///
/// `GET /api/recipes/download_shopping_cart`
///
/// # Response
///
/// A `text/plain` attachment named `shopping_list.txt`. Ingredients from all
/// recipes in the cart are summed per name and unit:
///
/// ```text
/// Shopping list
/// Flour - 300 (g)
/// Sugar - 150 (g)
/// ```
pub async fn download_shopping_cart_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let text = state.bookmark_service.shopping_list(user.id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\""),
            ),
        ],
        text,
    ))
}
