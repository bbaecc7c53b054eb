mod common;

use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

use movie_ratings::infrastructure::memory::InMemoryStore;

fn server() -> axum_test::TestServer {
    let store = Arc::new(InMemoryStore::new());
    common::create_test_server(common::create_test_state(store, None))
}

#[tokio::test]
async fn test_register_success() {
    let server = server();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "Ada@Example.com",
            "password": common::PASSWORD,
            "age": 36,
            "zipcode": "94110"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert!(json["id"].is_i64());
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["age"], 36);
    assert_eq!(json["zipcode"], "94110");
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let server = server();
    common::register(&server, "ada@example.com").await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "ADA@example.com", "password": common::PASSWORD }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "conflict"
    );
}

#[tokio::test]
async fn test_register_validation_error() {
    let server = server();

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "not-an-email", "password": "short" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let server = server();
    let id = common::register(&server, "ada@example.com").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ada@example.com", "password": common::PASSWORD }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["user_id"], id);
    assert_eq!(json["token_type"], "Bearer");
    assert!(!json["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let server = server();
    common::register(&server, "ada@example.com").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ada@example.com", "password": "wrong-password" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email_unauthorized() {
    let server = server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": common::PASSWORD }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "unauthorized"
    );
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let server = server();
    let (_, token) = common::signed_in(&server, "ada@example.com").await;

    server
        .post("/api/auth/logout")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .post("/api/auth/logout")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_token_unauthorized() {
    let server = server();

    let response = server.post("/api/auth/logout").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
}
