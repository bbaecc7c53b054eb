//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Rate limiter for the credential endpoints (register, login).
///
/// # Limits
///
/// - **Rate**: one token replenished per second
/// - **Burst**: 10 requests
///
/// Limits apply per peer IP address; requests over the limit receive
/// `429 Too Many Requests`. The server must be served with
/// `into_make_service_with_connect_info::<SocketAddr>` for the peer address
/// to be available.
pub fn auth_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(1)
            .burst_size(10)
            .finish()
            .expect("static governor configuration is valid"),
    );

    GovernorLayer::new(governor_conf)
}
