#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use notemaster_api::config::{ServerConfig, StoreBackend};
use notemaster_api::router::build_app_router;
use notemaster_api::state::AppState;
use notemaster_core::store::MemoryNoteStore;
use notemaster_services::NoteService;
use serde_json::Value;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5000".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Uses [`build_app_router`] so tests exercise the production middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState {
        notes: NoteService::new(Arc::new(MemoryNoteStore::new())),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Send a raw, possibly malformed, JSON body.
pub async fn post_raw(app: Router, uri: &str, raw: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `infoItems.id` of a successful create envelope.
pub fn created_id(envelope: &Value) -> String {
    envelope["infoItems"]["id"]
        .as_str()
        .expect("create envelope carries the new id")
        .to_string()
}
