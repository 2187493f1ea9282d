//! Handlers for recipes and their short links.

use axum::{
    Json,
    extract::{OriginalUri, RawQuery, State},
    http::StatusCode,
};

use crate::api::dto::pagination::Page;
use crate::api::dto::recipes::{
    CreateRecipeRequest, RecipeListParams, RecipeResponse, ShortLinkResponse,
    UpdateRecipeRequest,
};
use crate::api::extract::{ValidJson, ValidPath};
use crate::api::middleware::{CurrentUser, MaybeUser};
use crate::error::AppError;
use crate::state::AppState;

/// Lists recipes, newest first.
///
/// # Endpoint
///
/// `GET /api/recipes`
///
/// # Query Parameters
///
/// - `page`, `limit` - pagination
/// - `author` - author id
/// - `tags` - tag slug, may repeat; matches recipes carrying any of them
/// - `is_favorited`, `is_in_shopping_cart` - `1` to keep only the caller's
///   favorites or cart; ignored for anonymous requests
pub async fn list_recipes_handler(
    State(state): State<AppState>,
    viewer: MaybeUser,
    OriginalUri(uri): OriginalUri,
    RawQuery(query): RawQuery,
) -> Result<Json<Page<RecipeResponse>>, AppError> {
    let params = RecipeListParams::parse(query.as_deref())?;
    let request = params.pagination.resolve(state.settings.page_size)?;

    let filter = params.into_filter(viewer.id(), request.offset(), request.limit);
    let (recipes, count) = state.recipe_service.list(filter).await?;

    let media_url = |path: &str| state.recipe_service.media_url(path);
    let results = recipes
        .into_iter()
        .map(|recipe| RecipeResponse::new(recipe, &media_url))
        .collect();

    Ok(Json(Page::new(
        results,
        count,
        request,
        &state.settings.public_url,
        &uri,
    )))
}

/// Publishes a recipe authored by the caller.
///
/// # Endpoint
///
/// `POST /api/recipes`, responds 201 with the full recipe.
///
/// # Request Body
///
/// ```json
/// {
///   "ingredients": [{ "id": 1123, "amount": 10 }],
///   "tags": [1, 2],
///   "image": "data:image/png;base64,iVBORw0...",
///   "name": "Porridge",
///   "text": "Boil the oats.",
///   "cooking_time": 10
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request keyed by field for empty, duplicated or unknown
/// tags and ingredients, out-of-range numbers and invalid images. Nothing is
/// written when validation fails.
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidJson(payload): ValidJson<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), AppError> {
    let recipe = state
        .recipe_service
        .create(user.id, payload.into())
        .await?;

    let media_url = |path: &str| state.recipe_service.media_url(path);
    Ok((
        StatusCode::CREATED,
        Json(RecipeResponse::new(recipe, &media_url)),
    ))
}

pub async fn get_recipe_handler(
    State(state): State<AppState>,
    viewer: MaybeUser,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<RecipeResponse>, AppError> {
    let recipe = state.recipe_service.get(id, viewer.id()).await?;

    let media_url = |path: &str| state.recipe_service.media_url(path);
    Ok(Json(RecipeResponse::new(recipe, &media_url)))
}

/// Updates a recipe owned by the caller.
///
/// # Endpoint
///
/// `PATCH /api/recipes/{id}`
///
/// `name`, `text`, `cooking_time` and `image` are optional. `tags` and
/// `ingredients` are required and replace the previous sets.
///
/// # Errors
///
/// - 403 Forbidden if the caller is not the author
/// - 404 Not Found if the recipe does not exist
/// - 400 Bad Request as for creation
pub async fn update_recipe_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidPath(id): ValidPath<i64>,
    ValidJson(payload): ValidJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, AppError> {
    let recipe = state
        .recipe_service
        .update(user.id, id, payload.into())
        .await?;

    let media_url = |path: &str| state.recipe_service.media_url(path);
    Ok(Json(RecipeResponse::new(recipe, &media_url)))
}

/// Deletes a recipe owned by the caller. Responds 204, or 403 for other users.
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidPath(id): ValidPath<i64>,
) -> Result<StatusCode, AppError> {
    state.recipe_service.delete(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the short link of a recipe.
///
/// # Endpoint
///
/// `GET /api/recipes/{id}/get-link`
///
/// # Response
///
/// ```json
/// { "short-link": "http://localhost:8000/s/12" }
/// ```
pub async fn get_link_handler(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    state.recipe_service.ensure_exists(id).await?;

    Ok(Json(ShortLinkResponse {
        short_link: format!("{}/s/{}", state.settings.public_url, id),
    }))
}
