//! Weather data models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TriggerCategory;

/// Current conditions at a location, produced once per poll
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    pub location_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub temperature: Decimal,
    pub rainfall: Decimal,
    pub wind_speed: Decimal,
    pub humidity: Decimal,
    pub pressure: Decimal,
}

impl WeatherReading {
    /// The measured value a trigger of `category` is compared against.
    ///
    /// Returns `None` for categories that a single snapshot cannot observe.
    pub fn value_for(&self, category: TriggerCategory) -> Option<Decimal> {
        match category {
            TriggerCategory::Rainfall => Some(self.rainfall),
            TriggerCategory::WindSpeed => Some(self.wind_speed),
            TriggerCategory::Temperature => Some(self.temperature),
            TriggerCategory::FloodRisk | TriggerCategory::Drought => None,
        }
    }
}

/// One forecast slot for a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    pub location_id: Uuid,
    pub forecast_time: DateTime<Utc>,
    pub temperature: Decimal,
    /// Probability of precipitation, 0-100
    pub rainfall_probability: Decimal,
    pub rainfall_amount: Decimal,
    pub wind_speed: Decimal,
    /// Derived risk score, 0.0-1.0
    pub risk_score: Decimal,
    pub potential_triggers: Vec<Uuid>,
}

impl ForecastPoint {
    /// Forecast counterpart of [`WeatherReading::value_for`]
    pub fn value_for(&self, category: TriggerCategory) -> Option<Decimal> {
        match category {
            TriggerCategory::Rainfall => Some(self.rainfall_amount),
            TriggerCategory::WindSpeed => Some(self.wind_speed),
            TriggerCategory::Temperature => Some(self.temperature),
            TriggerCategory::FloodRisk | TriggerCategory::Drought => None,
        }
    }
}
