//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap API for current conditions and forecasts

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::{ForecastPoint, WeatherReading};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Forecast slots returned per request: 16 three-hour slots, the next 48 hours
pub const FORECAST_POINTS: usize = 16;

/// Source of current conditions and forecasts for a coordinate pair
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
        location_id: Uuid,
    ) -> AppResult<WeatherReading>;

    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        location_id: Uuid,
    ) -> AppResult<Vec<ForecastPoint>>;
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    main: OWMMain,
    wind: OWMWind,
    rain: Option<OWMRain>,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    wind: OWMWind,
    #[serde(default)]
    pop: f64,
    rain: Option<OWMRain>,
}

/// Convert an API measurement, rejecting NaN and infinities
fn decimal(field: &str, value: f64) -> AppResult<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| {
        AppError::WeatherService(format!("unrepresentable {} value: {}", field, value))
    })
}

impl WeatherClient {
    /// Create a new WeatherClient with custom base URL
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<T> {
        if self.api_key.is_empty() {
            return Err(AppError::Configuration(
                "Weather API key not configured".to_string(),
            ));
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherService(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherService(format!("{} - {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::WeatherService(format!("failed to parse {} response: {}", endpoint, e)))
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    /// Fetch current weather conditions by GPS coordinates
    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
        location_id: Uuid,
    ) -> AppResult<WeatherReading> {
        let data: OWMCurrentResponse = self.fetch("weather", latitude, longitude).await?;
        convert_current_response(data, location_id, Utc::now())
    }

    /// Fetch the next 48 hours of forecast by GPS coordinates
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        location_id: Uuid,
    ) -> AppResult<Vec<ForecastPoint>> {
        let data: OWMForecastResponse = self.fetch("forecast", latitude, longitude).await?;
        convert_forecast_response(data, location_id)
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(
    data: OWMCurrentResponse,
    location_id: Uuid,
    timestamp: DateTime<Utc>,
) -> AppResult<WeatherReading> {
    Ok(WeatherReading {
        location_id,
        timestamp,
        temperature: decimal("temperature", data.main.temp)?,
        rainfall: decimal("rainfall", data.rain.and_then(|r| r.one_hour).unwrap_or(0.0))?,
        wind_speed: decimal("wind_speed", data.wind.speed)?,
        humidity: decimal("humidity", data.main.humidity)?,
        pressure: decimal("pressure", data.main.pressure)?,
    })
}

/// Convert OpenWeatherMap forecast response to our format.
///
/// Risk scores and potential triggers are left empty for the forecast service.
fn convert_forecast_response(
    data: OWMForecastResponse,
    location_id: Uuid,
) -> AppResult<Vec<ForecastPoint>> {
    data.list
        .into_iter()
        .take(FORECAST_POINTS)
        .map(|item| {
            Ok(ForecastPoint {
                location_id,
                forecast_time: DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now),
                temperature: decimal("temperature", item.main.temp)?,
                rainfall_probability: decimal("pop", item.pop)? * Decimal::ONE_HUNDRED,
                rainfall_amount: decimal(
                    "rainfall",
                    item.rain.and_then(|r| r.three_hour).unwrap_or(0.0),
                )?,
                wind_speed: decimal("wind_speed", item.wind.speed)?,
                risk_score: Decimal::ZERO,
                potential_triggers: Vec::new(),
            })
        })
        .collect()
}
