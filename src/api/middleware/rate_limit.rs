//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Seconds needed to replenish one request.
const LOGIN_REPLENISH_SECONDS: u64 = 1;
const LOGIN_BURST: u32 = 10;

/// Creates a rate limiter for the login endpoint.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>`.
///
/// # Example
///
/// ```rust,ignore
/// let login = Router::new()
///     .route("/auth/token/login", post(login_handler))
///     .layer(rate_limit::login_layer());
/// ```
pub fn login_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(LOGIN_REPLENISH_SECONDS)
            .burst_size(LOGIN_BURST)
            .finish()
            .expect("login rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
