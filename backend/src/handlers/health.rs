//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::MonitorState;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub monitor: MonitorState,
    pub sweeps_completed: u64,
}

#[derive(Serialize)]
pub struct RootResponse {
    pub status: String,
    pub service: String,
}

/// Root endpoint
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "active".to_string(),
        service: "Hyperlocal Intelligence Platform".to_string(),
    })
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        monitor: state.monitor.state(),
        sweeps_completed: state.monitor.sweeps_completed(),
    })
}
