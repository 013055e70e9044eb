//! HTTP handlers for location endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::Location;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::location::{AddPolicyInput, CreateLocationInput, LocationService};
use crate::AppState;

/// Query parameters for listing locations
#[derive(Debug, Deserialize)]
pub struct LocationListQuery {
    pub insurer_id: Option<String>,
}

/// Register a new insured location
pub async fn create_location(
    State(state): State<AppState>,
    Json(input): Json<CreateLocationInput>,
) -> AppResult<Json<Location>> {
    let service = LocationService::new(state.store);
    let location = service.create_location(input).await?;
    Ok(Json(location))
}

/// Get a location by ID
pub async fn get_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> AppResult<Json<Location>> {
    let service = LocationService::new(state.store);
    let location = service.get_location(location_id).await?;
    Ok(Json(location))
}

/// List locations, optionally filtered by insurer
pub async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationListQuery>,
) -> AppResult<Json<Vec<Location>>> {
    let service = LocationService::new(state.store);
    let locations = service.list_locations(query.insurer_id.as_deref()).await?;
    Ok(Json(locations))
}

/// Attach a policy to a location
pub async fn add_location_policy(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
    Json(input): Json<AddPolicyInput>,
) -> AppResult<Json<Location>> {
    let service = LocationService::new(state.store);
    let location = service.add_policy(location_id, input).await?;
    Ok(Json(location))
}
