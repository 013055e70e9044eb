//! HTTP handlers for forecast endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{ForecastPoint, WeatherReading};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::ForecastService;
use crate::AppState;

/// Get the scored hyperlocal forecast for a location
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> AppResult<Json<Vec<ForecastPoint>>> {
    let service = ForecastService::new(state.store, state.weather);
    let forecast = service.get_forecast(location_id).await?;
    Ok(Json(forecast))
}

/// Get current weather for a location
pub async fn get_current_weather(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> AppResult<Json<WeatherReading>> {
    let service = ForecastService::new(state.store, state.weather);
    let reading = service.get_current_weather(location_id).await?;
    Ok(Json(reading))
}
