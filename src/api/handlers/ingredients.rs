//! Handlers for the ingredient catalogue.

use axum::{
    Json,
    extract::State,
};

use crate::api::dto::ingredients::{IngredientQuery, IngredientResponse};
use crate::api::extract::{ValidPath, ValidQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Searches ingredients by name prefix.
///
/// # Endpoint
///
/// `GET /api/ingredients?name=sug`
///
/// Matching is case-insensitive; without `name` the whole catalogue is
/// returned ordered by name. Not paginated.
pub async fn list_ingredients_handler(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<IngredientQuery>,
) -> Result<Json<Vec<IngredientResponse>>, AppError> {
    let ingredients = state
        .ingredient_service
        .search(query.name.as_deref())
        .await?;

    Ok(Json(ingredients.into_iter().map(Into::into).collect()))
}

pub async fn get_ingredient_handler(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<IngredientResponse>, AppError> {
    Ok(Json(state.ingredient_service.get(id).await?.into()))
}
