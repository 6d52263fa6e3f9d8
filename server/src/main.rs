//! Transmarin Server binary.

use transmarin_engine::{seed_mock_data, CollectionStore, FileStorage, Storage};
use transmarin_server::{app, config::Config, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "transmarin_server=debug,transmarin_engine=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Transmarin Server on {}:{}", config.host, config.port);

    // Open storage
    let path = config.storage_path();
    tracing::info!("Opening storage at {}", path.display());
    let storage: Box<dyn Storage + Send> = Box::new(FileStorage::open(&path)?);
    let mut store = CollectionStore::new(storage);

    if config.seed_on_start {
        let report = seed_mock_data(&mut store)?;
        tracing::info!(
            seeded = ?report.seeded,
            "Seeding finished"
        );
    }

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(store, config);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
