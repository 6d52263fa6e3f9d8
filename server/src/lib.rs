//! Transmarin Server - HTTP host for the dashboard's collections.
//!
//! The server owns one [`CollectionStore`] over a file-backed substrate and
//! exposes it, together with the simulated login and dashboard statistics,
//! as a JSON API.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

use crate::config::Config;
use crate::error::{AppError, Result};
use axum::Router;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use transmarin_engine::{CollectionStore, Storage};

/// The store behind the server, over whichever substrate `main` opened.
pub type DynStore = CollectionStore<Box<dyn Storage + Send>>;

/// Store type shared by every handler.
pub type SharedStore = Arc<Mutex<DynStore>>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: DynStore, config: Config) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            config: Arc::new(config),
        }
    }

    /// Run a read-modify-write cycle on the blocking pool.
    ///
    /// Writes persist synchronously through the substrate (file writes for
    /// [`transmarin_engine::FileStorage`]), so the lock is held off the async
    /// workers for the whole cycle.
    pub async fn write_store<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut DynStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let mut guard = store.blocking_lock();
            f(&mut *guard)
        })
        .await
        .map_err(|e| AppError::Internal(format!("store task failed: {}", e)))?
    }
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
