mod config;
mod db;
mod domain;
mod error;
mod services;
mod state;
mod web;

use crate::config::{AppConfig, StorageConfig};
use crate::db::{EntryStore, MemoryEntryStore, PgEntryStore};
use crate::services::predictor::HttpPredictor;
use crate::state::SharedState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let store = open_store(&config.storage).await?;

    let predictor = Arc::new(HttpPredictor::new(&config.predictor)?);
    tracing::info!("Predictor at {}", config.predictor.base_url);
    tracing::info!(
        "Scoring scales: panicAttacks={}, feelingWorthy={}",
        config.scoring.panic_attacks.as_str(),
        config.scoring.feeling_worthy.as_str()
    );

    let shared: SharedState = Arc::new(state::AppState {
        store,
        predictor,
        scoring: config.scoring,
    });

    let app = web::routes(shared)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("Listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn open_store(storage: &StorageConfig) -> anyhow::Result<Arc<dyn EntryStore>> {
    match storage {
        StorageConfig::Memory => {
            tracing::warn!("Using in-memory entry store; data is lost on restart");
            Ok(Arc::new(MemoryEntryStore::new()))
        }
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to connect to database: {}", e);
                    e
                })?;
            tracing::info!("Database connection established");

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to run database migrations: {}", e);
                    e
                })?;
            tracing::info!("Database migrations completed");

            Ok(Arc::new(PgEntryStore::new(pool)))
        }
    }
}
