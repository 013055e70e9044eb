//! HTTP handlers for alert endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use shared::Alert;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::alert::{AlertFilter, AlertService, ResolveResponse};
use crate::AppState;

/// List all alerts with optional filtering
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(filter): Query<AlertFilter>,
) -> AppResult<Json<Vec<Alert>>> {
    let service = AlertService::new(state.store);
    let alerts = service.list_alerts(&filter).await?;
    Ok(Json(alerts))
}

/// Get alerts for a specific location
pub async fn list_location_alerts(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
    Query(filter): Query<AlertFilter>,
) -> AppResult<Json<Vec<Alert>>> {
    let service = AlertService::new(state.store);
    let alerts = service.list_location_alerts(location_id, &filter).await?;
    Ok(Json(alerts))
}

/// Get an alert by ID
pub async fn get_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
) -> AppResult<Json<Alert>> {
    let service = AlertService::new(state.store);
    let alert = service.get_alert(alert_id).await?;
    Ok(Json(alert))
}

/// Mark an alert as resolved
pub async fn resolve_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
) -> AppResult<Json<ResolveResponse>> {
    let service = AlertService::new(state.store);
    let response = service.resolve_alert(alert_id).await?;
    Ok(Json(response))
}
