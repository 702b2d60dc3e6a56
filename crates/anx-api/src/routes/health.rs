use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub source: String,
    /// Number of successful reloads; 0 while no lines are loaded
    pub generation: u64,
    pub lines: usize,
    pub sessions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Health check endpoint
///
/// Reports the loaded flow graph and the number of live sessions
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let graph = state.engine.graph().await;
    let loaded_at = (graph.generation() > 0).then(|| graph.loaded_at());

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.source.name().to_string(),
        generation: graph.generation(),
        lines: graph.len(),
        sessions: state.engine.session_count().await,
        loaded_at,
    })
}
