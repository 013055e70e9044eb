//! HTTP handlers for parametric trigger endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::ParametricTrigger;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::trigger::{CreateTriggerInput, ToggleResponse, TriggerService};
use crate::AppState;

/// Create a new parametric trigger
pub async fn create_trigger(
    State(state): State<AppState>,
    Json(input): Json<CreateTriggerInput>,
) -> AppResult<Json<ParametricTrigger>> {
    let service = TriggerService::new(state.store);
    let trigger = service.create_trigger(input).await?;
    Ok(Json(trigger))
}

/// Get a trigger by ID
pub async fn get_trigger(
    State(state): State<AppState>,
    Path(trigger_id): Path<Uuid>,
) -> AppResult<Json<ParametricTrigger>> {
    let service = TriggerService::new(state.store);
    let trigger = service.get_trigger(trigger_id).await?;
    Ok(Json(trigger))
}

/// List all triggers for a location
pub async fn list_location_triggers(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> AppResult<Json<Vec<ParametricTrigger>>> {
    let service = TriggerService::new(state.store);
    let triggers = service.list_location_triggers(location_id).await?;
    Ok(Json(triggers))
}

/// Activate or deactivate a trigger
pub async fn toggle_trigger(
    State(state): State<AppState>,
    Path(trigger_id): Path<Uuid>,
) -> AppResult<Json<ToggleResponse>> {
    let service = TriggerService::new(state.store);
    let response = service.toggle_trigger(trigger_id).await?;
    Ok(Json(response))
}
