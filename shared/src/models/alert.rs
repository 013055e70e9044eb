//! Risk alert models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Alert severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// observed / threshold < 1.0
    Low,
    /// 1.0 <= ratio < 1.2
    Medium,
    /// 1.2 <= ratio < 1.5
    High,
    /// ratio >= 1.5
    Critical,
}

impl RiskLevel {
    /// Classify a ratio of observed value to threshold
    pub fn from_ratio(ratio: Decimal) -> RiskLevel {
        if ratio >= Decimal::new(15, 1) {
            RiskLevel::Critical
        } else if ratio >= Decimal::new(12, 1) {
            RiskLevel::High
        } else if ratio >= Decimal::ONE {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Classify an observation against its threshold.
    ///
    /// A non-positive threshold yields a ratio of zero. A ratio too large
    /// to represent is critical.
    pub fn classify(current: Decimal, threshold: Decimal) -> RiskLevel {
        if threshold <= Decimal::ZERO {
            return RiskLevel::from_ratio(Decimal::ZERO);
        }
        match current.checked_div(threshold) {
            Some(ratio) => RiskLevel::from_ratio(ratio),
            None => RiskLevel::Critical,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Critical => write!(f, "critical"),
        }
    }
}

/// Alert raised when a trigger fires
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: Uuid,
    pub location_id: Uuid,
    pub trigger_id: Uuid,
    pub risk_level: RiskLevel,
    pub message: String,
    pub current_value: Decimal,
    pub threshold_value: Decimal,
    pub triggered_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub prescriptive_actions: Vec<String>,
}
