//! Shared fixtures: a gateway router backed by a real file store in a temp
//! directory, plus request and body helpers.

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::Value;
use signal_gateway::{build_router, AdminConfig, GatewayConfig, RateLimitLayer};
use signal_moderation::ModerationEngine;
use signal_store::FileStore;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_IDENTITY: &str = "admin";
pub const ADMIN_SECRET: &str = "hunter2";

/// A router wired to a throwaway data directory. Dropping the app deletes
/// the directory.
pub struct TestApp {
    pub router: Router,
    pub data_dir: TempDir,
}

/// Gateway config with test credentials over the defaults.
pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        admin: AdminConfig {
            identity: ADMIN_IDENTITY.into(),
            secret: ADMIN_SECRET.into(),
        },
        ..GatewayConfig::default()
    }
}

pub fn test_app() -> TestApp {
    test_app_with(test_config())
}

pub fn test_app_with(config: GatewayConfig) -> TestApp {
    let data_dir = TempDir::new().expect("temp dir");
    let engine = Arc::new(engine_at(data_dir.path()));
    let rate_limit = RateLimitLayer::new(config.rate_limit.clone());
    let router = build_router(&config, engine, rate_limit);
    TestApp { router, data_dir }
}

/// A moderation engine over an existing data directory, for tests that
/// simulate restarts or concurrent processes.
pub fn engine_at(path: &Path) -> ModerationEngine {
    ModerationEngine::new(FileStore::new(path))
}

/// The Authorization header value the test admin uses.
pub fn admin_header() -> String {
    format!(
        "Basic {}",
        BASE64.encode(format!("{ADMIN_IDENTITY}:{ADMIN_SECRET}"))
    )
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn get_authed(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, admin_header())
        .body(Body::empty())
        .expect("request")
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn post_json_authed(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, admin_header())
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Drive one request through the router.
pub async fn send(router: &Router, req: Request<Body>) -> Response<Body> {
    router.clone().oneshot(req).await.expect("infallible")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

/// Submit a payload expecting acceptance; returns the assigned id.
pub async fn submit_ok(router: &Router, payload: &Value) -> String {
    let response = send(router, post_json("/signals", payload)).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let body = body_json(response).await;
    body["id"].as_str().expect("id in response").to_string()
}
