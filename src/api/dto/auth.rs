//! DTOs for token login.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credentials exchanged for an auth token.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "This field may not be blank"))]
    pub email: String,

    #[validate(length(min = 1, message = "This field may not be blank"))]
    pub password: String,
}

/// Token to send as `Authorization: Bearer <auth_token>`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub auth_token: String,
}
