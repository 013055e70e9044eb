//! Validation utilities for the Hyperlocal Intelligence Platform
//!
//! Trigger configuration is checked when a trigger is registered so that
//! evaluation never has to divide by a zero threshold or silently skip a
//! category it cannot observe.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TriggerCategory;

/// Rejected trigger configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TriggerConfigError {
    #[error("Threshold must be non-zero")]
    ZeroThreshold,

    #[error("Threshold for {0} cannot be negative")]
    NegativeThreshold(TriggerCategory),

    #[error("Category {0} cannot be evaluated from current weather readings")]
    UnobservableCategory(TriggerCategory),

    #[error("Duration must be at least 1 hour")]
    InvalidDuration,

    #[error("Payout amount cannot be negative")]
    NegativePayout,
}

impl TriggerConfigError {
    /// Name of the input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            TriggerConfigError::ZeroThreshold | TriggerConfigError::NegativeThreshold(_) => {
                "threshold_value"
            }
            TriggerConfigError::UnobservableCategory(_) => "category",
            TriggerConfigError::InvalidDuration => "duration_hours",
            TriggerConfigError::NegativePayout => "payout_amount",
        }
    }
}

// ============================================================================
// Trigger Validations
// ============================================================================

/// Validate the threshold for a trigger category
pub fn validate_threshold(
    category: TriggerCategory,
    threshold: Decimal,
) -> Result<(), TriggerConfigError> {
    if threshold.is_zero() {
        return Err(TriggerConfigError::ZeroThreshold);
    }
    if category.is_non_negative() && threshold.is_sign_negative() {
        return Err(TriggerConfigError::NegativeThreshold(category));
    }
    Ok(())
}

/// Validate that the category maps to a measured weather field
pub fn validate_category(category: TriggerCategory) -> Result<(), TriggerConfigError> {
    if category.is_observable() {
        Ok(())
    } else {
        Err(TriggerConfigError::UnobservableCategory(category))
    }
}

/// Validate the declared minimum duration
pub fn validate_duration_hours(hours: u32) -> Result<(), TriggerConfigError> {
    if hours == 0 {
        return Err(TriggerConfigError::InvalidDuration);
    }
    Ok(())
}

/// Validate an optional payout amount
pub fn validate_payout(amount: Option<Decimal>) -> Result<(), TriggerConfigError> {
    match amount {
        Some(a) if a.is_sign_negative() && !a.is_zero() => Err(TriggerConfigError::NegativePayout),
        _ => Ok(()),
    }
}

/// Run every trigger configuration check, returning the first failure
pub fn validate_trigger_config(
    category: TriggerCategory,
    threshold: Decimal,
    duration_hours: u32,
    payout_amount: Option<Decimal>,
) -> Result<(), TriggerConfigError> {
    validate_category(category)?;
    validate_threshold(category, threshold)?;
    validate_duration_hours(duration_hours)?;
    validate_payout(payout_amount)
}
