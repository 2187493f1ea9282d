//! Handlers for user registration, profiles, passwords and avatars.

use axum::{
    Json,
    extract::{OriginalUri, State},
    http::StatusCode,
};

use crate::api::dto::pagination::{Page, PaginationParams};
use crate::api::dto::users::{
    AvatarRequest, AvatarResponse, RegisterRequest, RegisteredUserResponse, SetPasswordRequest,
    UserResponse,
};
use crate::api::extract::{ValidJson, ValidPath, ValidQuery};
use crate::api::middleware::{CurrentUser, MaybeUser};
use crate::error::AppError;
use crate::state::AppState;

/// Lists users ordered by username.
///
/// # Endpoint
///
/// `GET /api/users?page=1&limit=6`
///
/// `is_subscribed` is relative to the caller and `false` for anonymous
/// requests.
pub async fn list_users_handler(
    State(state): State<AppState>,
    viewer: MaybeUser,
    OriginalUri(uri): OriginalUri,
    ValidQuery(params): ValidQuery<PaginationParams>,
) -> Result<Json<Page<UserResponse>>, AppError> {
    let request = params.resolve(state.settings.page_size)?;

    let (profiles, count) = state
        .user_service
        .list(viewer.id(), request.offset(), request.limit)
        .await?;

    let media_url = |path: &str| state.user_service.media_url(path);
    let results = profiles
        .into_iter()
        .map(|profile| UserResponse::from_profile(profile, &media_url))
        .collect();

    Ok(Json(Page::new(
        results,
        count,
        request,
        &state.settings.public_url,
        &uri,
    )))
}

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "chef@example.com",
///   "username": "chef",
///   "first_name": "Julia",
///   "last_name": "Child",
///   "password": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request keyed by field for invalid input, a taken email
/// or username, or the reserved username `me`.
pub async fn register_handler(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredUserResponse>), AppError> {
    let user = state.user_service.register(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Returns a single user. `GET /api/users/{id}`.
pub async fn get_user_handler(
    State(state): State<AppState>,
    viewer: MaybeUser,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let profile = state.user_service.get_profile(id, viewer.id()).await?;

    let media_url = |path: &str| state.user_service.media_url(path);
    Ok(Json(UserResponse::from_profile(profile, &media_url)))
}

/// Returns the caller. `GET /api/users/me`.
pub async fn me_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<UserResponse> {
    let media_url = |path: &str| state.user_service.media_url(path);

    Json(UserResponse::new(user, false, &media_url))
}

/// Changes the caller's password.
///
/// # Endpoint
///
/// `POST /api/users/set_password`, responds 204.
///
/// # Errors
///
/// Returns 400 Bad Request keyed by `current_password` if it is wrong.
pub async fn set_password_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidJson(payload): ValidJson<SetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    state
        .user_service
        .set_password(user.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Replaces the caller's avatar.
///
/// # Endpoint
///
/// `PUT /api/users/me/avatar`
///
/// # Request Body
///
/// ```json
/// { "avatar": "data:image/png;base64,iVBORw0..." }
/// ```
///
/// # Response
///
/// ```json
/// { "avatar": "http://localhost:8000/media/users/avatars/k2j...png" }
/// ```
pub async fn set_avatar_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidJson(payload): ValidJson<AvatarRequest>,
) -> Result<Json<AvatarResponse>, AppError> {
    let path = state
        .user_service
        .set_avatar(user.id, &payload.avatar)
        .await?;

    Ok(Json(AvatarResponse {
        avatar: state.user_service.media_url(&path),
    }))
}

/// Removes the caller's avatar. `DELETE /api/users/me/avatar`, responds 204.
pub async fn delete_avatar_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_avatar(user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
