//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /s/{id}`   - Recipe short link redirect (public)
//! - `GET  /health`   - Health check (public)
//! - `/api/*`         - REST API, optional Bearer token
//! - `/media/*`       - Uploaded images
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on login
//! - **Authentication** - Bearer token resolved for every API request
//! - **Body limit** - Caps uploads, including inline base64 images
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::{Router, middleware};
use std::path::PathBuf;
use tower::Layer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Router settings that do not belong to [`AppState`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Directory served under `/media`.
    pub media_root: PathBuf,
    pub max_upload_bytes: usize,
    /// Per-IP limit on login. Needs `ConnectInfo<SocketAddr>`, so it is
    /// switched off when the router is driven without a socket.
    pub rate_limit_login: bool,
}

impl RouterOptions {
    pub fn new(media_root: impl Into<PathBuf>, max_upload_bytes: usize) -> Self {
        Self {
            media_root: media_root.into(),
            max_upload_bytes,
            rate_limit_login: true,
        }
    }
}

/// Builds all routes and middleware, without path normalization.
pub fn router(state: AppState, options: &RouterOptions) -> Router {
    let login = if options.rate_limit_login {
        api::routes::login_routes().layer(rate_limit::login_layer())
    } else {
        api::routes::login_routes()
    };

    let api_router = login
        .merge(api::routes::api_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/s/{id}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .nest_service("/media", ServeDir::new(&options.media_root))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(options.max_upload_bytes))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with trailing slashes trimmed.
pub fn app_router(state: AppState, options: &RouterOptions) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, options))
}
