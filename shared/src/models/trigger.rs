//! Parametric trigger models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weather parameter a trigger watches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCategory {
    Rainfall,
    WindSpeed,
    Temperature,
    FloodRisk,
    Drought,
}

impl TriggerCategory {
    pub const ALL: [TriggerCategory; 5] = [
        TriggerCategory::Rainfall,
        TriggerCategory::WindSpeed,
        TriggerCategory::Temperature,
        TriggerCategory::FloodRisk,
        TriggerCategory::Drought,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerCategory::Rainfall => "rainfall",
            TriggerCategory::WindSpeed => "wind_speed",
            TriggerCategory::Temperature => "temperature",
            TriggerCategory::FloodRisk => "flood_risk",
            TriggerCategory::Drought => "drought",
        }
    }

    /// Whether a single weather reading carries a value for this category.
    ///
    /// Flood risk and drought are derived conditions with no direct
    /// measurement in a current-weather snapshot.
    pub fn is_observable(&self) -> bool {
        match self {
            TriggerCategory::Rainfall
            | TriggerCategory::WindSpeed
            | TriggerCategory::Temperature => true,
            TriggerCategory::FloodRisk | TriggerCategory::Drought => false,
        }
    }

    /// Whether the measured quantity can never be negative
    pub fn is_non_negative(&self) -> bool {
        !matches!(self, TriggerCategory::Temperature)
    }
}

impl std::fmt::Display for TriggerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison applied between the observed value and the threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdOperator {
    Gt,
    Lt,
    Gte,
    Lte,
    Eq,
}

impl ThresholdOperator {
    /// Apply the operator as `observed <op> threshold`
    pub fn compare(&self, observed: Decimal, threshold: Decimal) -> bool {
        match self {
            ThresholdOperator::Gt => observed > threshold,
            ThresholdOperator::Lt => observed < threshold,
            ThresholdOperator::Gte => observed >= threshold,
            ThresholdOperator::Lte => observed <= threshold,
            ThresholdOperator::Eq => observed == threshold,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ThresholdOperator::Gt => ">",
            ThresholdOperator::Lt => "<",
            ThresholdOperator::Gte => ">=",
            ThresholdOperator::Lte => "<=",
            ThresholdOperator::Eq => "==",
        }
    }
}

impl std::fmt::Display for ThresholdOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A registered parametric condition for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParametricTrigger {
    pub id: Uuid,
    pub location_id: Uuid,
    pub category: TriggerCategory,
    pub threshold_value: Decimal,
    pub threshold_operator: ThresholdOperator,
    /// Minimum sustained duration. Stored with the trigger but evaluation
    /// currently looks at a single reading.
    pub duration_hours: u32,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}
