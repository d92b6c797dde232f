//! HTTP server entry point.
//!
//! Loads configuration, seeds the record store from the configured CSV
//! files and serves the analytics API.

use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use workforce_analytics::api::{create_router, AppState};
use workforce_analytics::config::{ConfigLoader, SeedConfig};
use workforce_analytics::error::EngineResult;
use workforce_analytics::ingest::{ingest_file, DataKind};
use workforce_analytics::storage::InMemoryStore;

/// Ingests each configured seed file, employees and projects first.
fn seed_store(store: &InMemoryStore, seed: &SeedConfig) -> EngineResult<()> {
    let files = [
        (DataKind::Employees, &seed.employees),
        (DataKind::Projects, &seed.projects),
        (DataKind::Timesheets, &seed.timesheets),
    ];
    for (kind, path) in files {
        if let Some(path) = path {
            let summary = ingest_file(store, kind, path)?;
            info!(
                table = %summary.table,
                rows = summary.rows_inserted,
                path = %path.display(),
                "Seeded table"
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConfigLoader::load_from_env()?.into_config();

    let store = Arc::new(InMemoryStore::new());
    seed_store(&store, &config.seed)?;

    let address = config.server.bind_address();
    let router = create_router(AppState::new(store, &config));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "Analytics API listening");
    axum::serve(listener, router).await?;
    Ok(())
}
