//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Health check: storage and critic configuration
//! - `/api/*`      - JSON API (see [`crate::api::routes`])
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on register and login
//! - **Authentication** - Bearer session tokens, required or optional per route
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// The returned service needs peer addresses for rate limiting; serve it with
/// `into_make_service_with_connect_info::<SocketAddr>`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::credential_routes()
        .layer(rate_limit::auth_layer())
        .merge(api::routes::routes(&state));

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
