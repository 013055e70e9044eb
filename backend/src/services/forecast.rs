//! Forecast and current-conditions service

use std::sync::Arc;

use shared::{ForecastPoint, Location, WeatherReading};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::WeatherSource;
use crate::services::risk_engine::score_forecast;
use crate::store::Store;

/// Serves scored forecasts for registered locations
#[derive(Clone)]
pub struct ForecastService {
    store: Arc<dyn Store>,
    weather: Arc<dyn WeatherSource>,
}

impl ForecastService {
    pub fn new(store: Arc<dyn Store>, weather: Arc<dyn WeatherSource>) -> Self {
        Self { store, weather }
    }

    fn location(&self, location_id: Uuid) -> AppResult<Location> {
        self.store
            .get_location(location_id)?
            .ok_or_else(|| AppError::not_found("Location"))
    }

    /// Forecast for the next 48 hours, each slot scored against the location's active triggers
    pub async fn get_forecast(&self, location_id: Uuid) -> AppResult<Vec<ForecastPoint>> {
        let location = self.location(location_id)?;
        let mut forecast = self
            .weather
            .forecast(location.latitude, location.longitude, location.id)
            .await?;

        let triggers = self.store.active_triggers_for_location(location.id)?;
        score_forecast(&mut forecast, &triggers);
        Ok(forecast)
    }

    /// Current conditions for a location
    pub async fn get_current_weather(&self, location_id: Uuid) -> AppResult<WeatherReading> {
        let location = self.location(location_id)?;
        self.weather
            .current_weather(location.latitude, location.longitude, location.id)
            .await
    }
}
