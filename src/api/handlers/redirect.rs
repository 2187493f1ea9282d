//! Handler for recipe short links.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short link to the recipe page.
///
/// # Endpoint
///
/// `GET /s/{id}`
///
/// Responds `307 Temporary Redirect` to `/recipes/{id}`.
///
/// # Errors
///
/// Returns 404 Not Found, without a redirect, if the id is not a number or
/// no such recipe exists.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::not_found("Recipe not found", json!({ "id": id })))?;

    state.recipe_service.ensure_exists(id).await?;

    debug!(recipe_id = id, "Short link resolved");

    Ok(Redirect::temporary(&format!("/recipes/{id}")))
}
