//! Health check endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use transmarin_engine::CollectionKind;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Collections that currently hold a value
    pub collections: usize,
}

/// Create health routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.store.lock().await;
    let collections = CollectionKind::ALL
        .iter()
        .filter(|kind| store.contains_key(kind.storage_key()))
        .count();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        collections,
    })
}

/// Root handler.
async fn root() -> &'static str {
    "Transmarin Server"
}
