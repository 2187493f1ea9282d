//! Handlers for following other users.

use axum::{
    Json,
    extract::{OriginalUri, State},
    http::StatusCode,
};

use crate::api::dto::pagination::Page;
use crate::api::dto::subscriptions::{SubscriptionParams, SubscriptionResponse};
use crate::api::extract::{ValidPath, ValidQuery};
use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's subscriptions ordered by username.
///
/// # Endpoint
///
/// `GET /api/users/subscriptions?page=1&limit=6&recipes_limit=3`
///
/// Each entry carries the author's total recipe count and up to
/// `recipes_limit` of their latest recipes.
pub async fn subscriptions_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    OriginalUri(uri): OriginalUri,
    ValidQuery(params): ValidQuery<SubscriptionParams>,
) -> Result<Json<Page<SubscriptionResponse>>, AppError> {
    let request = params.pagination.resolve(state.settings.page_size)?;

    let (subscriptions, count) = state
        .follow_service
        .subscriptions(
            user.id,
            request.offset(),
            request.limit,
            params.recipes_limit(),
        )
        .await?;

    let media_url = |path: &str| state.user_service.media_url(path);
    let results = subscriptions
        .into_iter()
        .map(|subscription| SubscriptionResponse::new(subscription, &media_url))
        .collect();

    Ok(Json(Page::new(
        results,
        count,
        request,
        &state.settings.public_url,
        &uri,
    )))
}

/// Subscribes the caller to a user.
///
/// # Endpoint
///
/// `POST /api/users/{id}/subscribe?recipes_limit=3`, responds 201.
///
/// # Errors
///
/// - 404 Not Found if the user does not exist
/// - 400 Bad Request when subscribing to yourself
/// - 409 Conflict if already subscribed
pub async fn subscribe_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidPath(author_id): ValidPath<i64>,
    ValidQuery(params): ValidQuery<SubscriptionParams>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    let subscription = state
        .follow_service
        .subscribe(user.id, author_id, params.recipes_limit())
        .await?;

    let media_url = |path: &str| state.user_service.media_url(path);
    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::new(subscription, &media_url)),
    ))
}

/// Unsubscribes the caller. `DELETE /api/users/{id}/subscribe`, responds 204.
pub async fn unsubscribe_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidPath(author_id): ValidPath<i64>,
) -> Result<StatusCode, AppError> {
    state.follow_service.unsubscribe(user.id, author_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
