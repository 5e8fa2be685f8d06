use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::{http::StatusCode, Json};
use content_ingest::IngestionDaemon;
use serde::Deserialize;
use serde_json::json;

pub struct AppState {
    pub daemon: Arc<IngestionDaemon>,
}

pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn ingestion_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.daemon.status().await)
}

pub async fn ingestion_start(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({"message": state.daemon.start().await}))
}

pub async fn ingestion_stop(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({"message": state.daemon.stop().await}))
}

pub async fn ingestion_pause(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({"message": state.daemon.pause().await}))
}

pub async fn ingestion_resume(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({"message": state.daemon.resume().await}))
}

#[derive(Debug, Deserialize)]
pub struct RunsQuery {
    limit: Option<i64>,
}

pub async fn ingestion_runs(State(state): State<Arc<AppState>>, Query(query): Query<RunsQuery>) -> impl IntoResponse {
    match state.daemon.runs(query.limit.unwrap_or(20)).await {
        Ok(runs) => Json(json!({"runs": runs})).into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to list ingestion runs");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "failed to list runs"}))).into_response()
        }
    }
}

pub async fn ingestion_providers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.daemon.providers().await {
        Ok(providers) => Json(json!({"providers": providers})).into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to list source providers");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "failed to list providers"}))).into_response()
        }
    }
}
