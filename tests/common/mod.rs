#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Duration;
use passdesk::config::settings::{AdminCredential, Settings, StorageBackend};
use passdesk::repository::Repositories;
use passdesk::repository::memory::MemoryDatabase;
use passdesk::routes;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const ADMIN_LOGIN: &str = "warden";
pub const ADMIN_PASSWORD: &str = "warden-password";

pub fn settings() -> Settings {
    Settings {
        server_address: "127.0.0.1".to_string(),
        server_port: 0,
        jwt_secret: "integration-test-secret-0123456789abcdef".to_string(),
        access_token_ttl: Duration::minutes(15),
        refresh_token_ttl: Duration::hours(24),
        bcrypt_cost: 4,
        admin: AdminCredential::new(ADMIN_LOGIN, ADMIN_PASSWORD),
        storage_backend: StorageBackend::Memory,
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: MemoryDatabase,
}

impl TestApp {
    pub fn new() -> Self {
        let db = MemoryDatabase::new();
        let router = routes::root::routes(&settings(), Repositories::in_memory(&db), None)
            .expect("router builds with a valid secret");
        Self { router, db }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body reads");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn register(&self, identity: &str, password: &str) -> Value {
        let (status, body) = self
            .send(post_json("/api/register", json!({ "identity": identity, "password": password })))
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["data"].clone()
    }

    pub async fn login(&self, identity: &str, password: &str) -> Value {
        let (status, body) = self
            .send(post_json("/api/login", json!({ "identity": identity, "password": password })))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"].clone()
    }
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub fn basic(login: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{login}:{password}")))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn get_with(uri: &str, authorization: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .expect("request builds")
}

pub fn post_json_with(uri: &str, authorization: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::AUTHORIZATION, authorization)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub fn delete_with(uri: &str, authorization: &str) -> Request<Body> {
    Request::delete(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .expect("request builds")
}

pub fn admin_basic() -> String {
    basic(ADMIN_LOGIN, ADMIN_PASSWORD)
}
