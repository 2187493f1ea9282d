//! Handlers for token login and logout.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::auth::{LoginRequest, TokenResponse};
use crate::api::extract::ValidJson;
use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges email and password for an auth token.
///
/// # Endpoint
///
/// `POST /api/auth/token/login`
///
/// # Request Body
///
/// ```json
/// { "email": "chef@example.com", "password": "..." }
/// ```
///
/// # Response
///
/// ```json
/// { "auth_token": "4f1c..." }
/// ```
///
/// A new login replaces the user's previous token.
///
/// # Errors
///
/// Returns 400 Bad Request for unknown email or wrong password.
/// Returns 429 Too Many Requests when the per-IP limit is exceeded.
pub async fn login_handler(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let auth_token = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(TokenResponse { auth_token }))
}

/// Revokes the caller's token.
///
/// `POST /api/auth/token/logout`, responds 204.
pub async fn logout_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
