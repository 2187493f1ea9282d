//! Handlers for recipe tags.

use axum::{
    Json,
    extract::State,
};

use crate::api::dto::tags::TagResponse;
use crate::api::extract::ValidPath;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all tags ordered by name. `GET /api/tags`, not paginated.
pub async fn list_tags_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, AppError> {
    let tags = state.tag_service.list().await?;

    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

pub async fn get_tag_handler(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<TagResponse>, AppError> {
    Ok(Json(state.tag_service.get(id).await?.into()))
}
