mod common;

use axum::http::StatusCode;
use common::{TestApp, post_json};
use serde_json::json;

#[tokio::test]
async fn register_login_refresh_then_replay_is_rejected() {
    let app = TestApp::new();

    let registered = app.register("a@x.com", "secret").await;
    assert_eq!(registered["is_admin"], false);

    let original = app.login("a@x.com", "secret").await;
    let original_refresh = original["refresh_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(post_json("/api/refresh", json!({ "refresh_token": original_refresh })))
        .await;
    assert_eq!(status, StatusCode::OK);
    let rotated = &body["data"];
    assert_ne!(rotated["refresh_token"], original["refresh_token"]);
    assert_ne!(rotated["access_token"], original["access_token"]);

    let (status, body) = app
        .send(post_json("/api/refresh", json!({ "refresh_token": original_refresh })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_REFRESH_TOKEN");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn registration_refresh_token_dies_on_login() {
    let app = TestApp::new();
    let registered = app.register("a@x.com", "secret").await;
    app.login("a@x.com", "secret").await;

    let (status, _) = app
        .send(post_json("/api/refresh", json!({ "refresh_token": registered["refresh_token"] })))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = TestApp::new();
    app.register("a@x.com", "secret").await;

    let (status, body) = app
        .send(post_json("/api/register", json!({ "identity": "a@x.com", "password": "other" })))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_IDENTITY");
}

#[tokio::test]
async fn failed_logins_share_one_answer() {
    let app = TestApp::new();
    app.register("a@x.com", "secret").await;

    let (wrong_status, wrong_body) = app
        .send(post_json("/api/login", json!({ "identity": "a@x.com", "password": "Secret" })))
        .await;
    let (unknown_status, unknown_body) = app
        .send(post_json("/api/login", json!({ "identity": "b@x.com", "password": "secret" })))
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn invalid_bodies_are_bad_requests() {
    let app = TestApp::new();

    let (empty_identity, body) = app
        .send(post_json("/api/register", json!({ "identity": "", "password": "secret" })))
        .await;
    assert_eq!(empty_identity, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "identity");

    let (unknown_company, body) = app
        .send(post_json(
            "/api/register",
            json!({ "identity": "a@x.com", "password": "secret", "company_id": 42 }),
        ))
        .await;
    assert_eq!(unknown_company, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn garbage_refresh_token_is_unauthorized() {
    let app = TestApp::new();

    let (status, body) = app
        .send(post_json("/api/refresh", json!({ "refresh_token": "garbage" })))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = TestApp::new();
    let pair = app.register("a@x.com", "secret").await;

    let (status, _) = app
        .send(post_json("/api/logout", json!({ "refresh_token": pair["refresh_token"] })))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(post_json("/api/refresh", json!({ "refresh_token": pair["refresh_token"] })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_refresh_rotates_once() {
    let app = TestApp::new();
    let pair = app.login(common::ADMIN_LOGIN, common::ADMIN_PASSWORD).await;

    let (first, body) = app
        .send(post_json("/api/refresh", json!({ "refresh_token": pair["refresh_token"] })))
        .await;
    let (second, _) = app
        .send(post_json("/api/refresh", json!({ "refresh_token": pair["refresh_token"] })))
        .await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(body["data"]["is_admin"], true);
    assert_eq!(second, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_reports_memory_backend() {
    let app = TestApp::new();

    let request = axum::http::Request::get("/api/health")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["storage"]["backend"], "memory");
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn password_limit_is_counted_in_bytes() {
    let app = TestApp::new();

    // 40 characters, 80 bytes.
    let (status, body) = app
        .send(post_json("/api/register", json!({ "identity": "a@x.com", "password": "ж".repeat(40) })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "password");

    let password = "a".repeat(72);
    app.register("a@x.com", &password).await;

    let longer = format!("{password}DIFFERENT");
    let (status, _) = app
        .send(common::get_with("/api/companies", &common::basic("a@x.com", &longer)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(common::get_with("/api/companies", &common::basic("a@x.com", &password)))
        .await;
    assert_eq!(status, StatusCode::OK);
}
