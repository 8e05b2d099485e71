use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt};

use freelance_tracker::modules::tracking::adapters::outbound::json_file_store::JsonFileTrackerStore;
use freelance_tracker::modules::tracking::adapters::outbound::store_in_memory::InMemoryTrackerStore;
use freelance_tracker::modules::tracking::core::ports::TrackerStore;
use freelance_tracker::shared::core::clock::SystemClock;
use freelance_tracker::shell::config::AppConfig;
use freelance_tracker::shell::http::router;
use freelance_tracker::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store: Arc<dyn TrackerStore> = match &config.data_file {
        Some(path) => Arc::new(
            JsonFileTrackerStore::open(path)
                .await
                .with_context(|| format!("opening tracker data at {}", path.display()))?,
        ),
        None => {
            tracing::warn!("TRACKER_DATA_FILE not set, data is kept in memory only");
            Arc::new(InMemoryTrackerStore::new())
        }
    };

    let app = router(AppState::new(store, Arc::new(SystemClock)));

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("API listening on http://{}", addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
