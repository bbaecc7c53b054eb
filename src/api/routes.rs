//! API route configuration.
//!
//! Routes are grouped by how they authenticate; [`crate::routes::app_router`]
//! nests them under `/api` and adds the rate limiter to
//! [`credential_routes`].

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::api::handlers::{
    login_handler, logout_handler, movie_detail_handler, movie_list_handler, prediction_handler,
    rate_movie_handler, register_handler, user_detail_handler, user_list_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;

/// Credential endpoints, public but rate limited by the caller.
///
/// - `POST /auth/register` - Create an account
/// - `POST /auth/login`    - Exchange credentials for a bearer token
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
}

/// Every other API route, with authentication attached.
///
/// Public:
/// - `GET /movies`, `GET /users`, `GET /users/{id}`
///
/// Bearer token optional:
/// - `GET /movies/{id}` - Detail view, personalised when signed in
///
/// Bearer token required:
/// - `GET  /movies/{id}/prediction`
/// - `PUT  /movies/{id}/rating`
/// - `POST /auth/logout`
pub fn routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/movies", get(movie_list_handler))
        .route("/users", get(user_list_handler))
        .route("/users/{id}", get(user_detail_handler));

    let viewer = Router::new()
        .route("/movies/{id}", get(movie_detail_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::optional_layer,
        ));

    let protected = Router::new()
        .route("/movies/{id}/prediction", get(prediction_handler))
        .route("/movies/{id}/rating", put(rate_movie_handler))
        .route("/auth/logout", post(logout_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new().merge(public).merge(viewer).merge(protected)
}
