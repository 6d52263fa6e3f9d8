//! HTTP route definitions.

mod auth;
mod collections;
mod dashboard;
mod health;

use crate::AppState;
use axum::Router;

/// Create all application routes.
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(dashboard::routes())
        .merge(collections::routes())
}
