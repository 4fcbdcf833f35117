use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health -- returns service and store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match state.notes.ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Store health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mount health check routes (root level, not under `/v1/notes`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
