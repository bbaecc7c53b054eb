#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;

use movie_ratings::api::handlers::health_handler;
use movie_ratings::api::routes::{credential_routes, routes};
use movie_ratings::domain::entities::{Movie, NewMovie};
use movie_ratings::domain::repositories::{MovieRepository, RatingRepository};
use movie_ratings::domain::scoring::{EngineConfig, SINGLE_OVERLAP_DISAGREEMENT};
use movie_ratings::infrastructure::memory::InMemoryStore;
use movie_ratings::state::{AppState, Repositories};

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const PASSWORD: &str = "correct-horse-battery";

pub fn create_test_state(store: Arc<InMemoryStore>, critic_id: Option<i64>) -> AppState {
    AppState::new(
        Repositories::in_memory(store),
        EngineConfig::new(SINGLE_OVERLAP_DISAGREEMENT, critic_id),
        SIGNING_SECRET.to_string(),
    )
}

/// API routes under `/api` plus `/health`, without the per-IP rate limiter.
pub fn create_test_server(state: AppState) -> TestServer {
    let api = credential_routes().merge(routes(&state));

    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state);

    TestServer::new(app).unwrap()
}

pub async fn create_test_movie(store: &InMemoryStore, title: &str) -> Movie {
    store
        .create(NewMovie {
            title: title.to_string(),
            released_at: None,
            imdb_url: None,
        })
        .await
        .unwrap()
}

pub async fn create_test_rating(store: &InMemoryStore, user_id: i64, movie_id: i64, score: i32) {
    store.upsert(user_id, movie_id, score).await.unwrap();
}

/// Registers an account through the API and returns its id.
pub async fn register(server: &TestServer, email: &str) -> i64 {
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": email, "password": PASSWORD }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<serde_json::Value>()["id"].as_i64().unwrap()
}

/// Logs in and returns the bearer token.
pub async fn login(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": PASSWORD }))
        .await;

    response.assert_status_ok();
    response.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Registers and logs in, returning `(user_id, token)`.
pub async fn signed_in(server: &TestServer, email: &str) -> (i64, String) {
    let id = register(server, email).await;
    let token = login(server, email).await;
    (id, token)
}
