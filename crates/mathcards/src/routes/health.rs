//! Health check endpoints.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::practice::StoreStats;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Basic health check (is the server running?)
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    sessions: StoreStats,
    uptime_secs: u64,
}

/// Metrics endpoint (for monitoring)
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        sessions: state.sessions.stats().await,
        uptime_secs: state.uptime_secs(),
    })
}
