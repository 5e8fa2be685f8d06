mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use content_config::AppConfig;
use content_ingest::IngestionDaemon;
use tracing_subscriber::EnvFilter;

use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env();
    let pool = content_store::connect(&config.store).await?;

    let daemon = Arc::new(IngestionDaemon::new(pool, config.ingest.clone(), config.llm.clone()));
    if config.ingest.auto_start {
        let message = daemon.start().await;
        tracing::info!(message, "auto-start ingestion");
    }

    let state = Arc::new(AppState { daemon });
    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/api/v1/ingestion/status", get(routes::ingestion_status))
        .route("/api/v1/ingestion/start", post(routes::ingestion_start))
        .route("/api/v1/ingestion/stop", post(routes::ingestion_stop))
        .route("/api/v1/ingestion/pause", post(routes::ingestion_pause))
        .route("/api/v1/ingestion/resume", post(routes::ingestion_resume))
        .route("/api/v1/ingestion/runs", get(routes::ingestion_runs))
        .route("/api/v1/ingestion/providers", get(routes::ingestion_providers))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "content-app listening");
    axum::serve(listener, app).await?;
    Ok(())
}
