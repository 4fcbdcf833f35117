#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use notemaster_api::config::{ServerConfig, StoreBackend};
use notemaster_api::router::build_app_router;
use notemaster_api::state::AppState;
use notemaster_core::store::MemoryNoteStore;
use notemaster_services::NoteService;
use notemaster_web::client::NoteApiClient;
use notemaster_web::config::ApiClientConfig;
use notemaster_web::site::{build_site_router, WebState};
use notemaster_web::templates::MiniJinjaEngine;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Start the REST API over a fresh in-memory store on an ephemeral port and
/// return its base URL.
pub async fn spawn_api() -> String {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: Vec::new(),
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
    };
    let state = AppState {
        notes: NoteService::new(Arc::new(MemoryNoteStore::new())),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn client(base_url: &str) -> NoteApiClient {
    NoteApiClient::new(&ApiClientConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

pub fn site(base_url: &str) -> Router {
    build_site_router(WebState {
        api: client(base_url),
        templates: Arc::new(MiniJinjaEngine::new().unwrap()),
    })
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
