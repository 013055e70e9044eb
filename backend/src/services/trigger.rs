//! Parametric trigger registration service

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{validate_trigger_config, ParametricTrigger, ThresholdOperator, TriggerCategory};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Trigger service for registering and toggling parametric triggers
#[derive(Clone)]
pub struct TriggerService {
    store: Arc<dyn Store>,
}

/// Input for creating a trigger
#[derive(Debug, Deserialize)]
pub struct CreateTriggerInput {
    pub location_id: Uuid,
    pub category: TriggerCategory,
    pub threshold_value: Decimal,
    pub threshold_operator: ThresholdOperator,
    #[serde(default = "default_duration_hours")]
    pub duration_hours: u32,
    #[serde(default = "default_active")]
    pub active: bool,
    pub payout_amount: Option<Decimal>,
}

fn default_duration_hours() -> u32 {
    1
}

fn default_active() -> bool {
    true
}

/// Result of toggling a trigger
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: Uuid,
    pub active: bool,
}

impl TriggerService {
    /// Create a new TriggerService instance
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register a trigger on an existing location.
    ///
    /// Thresholds of zero and categories without a measured weather field
    /// are rejected here so the risk engine never has to guess.
    pub async fn create_trigger(&self, input: CreateTriggerInput) -> AppResult<ParametricTrigger> {
        validate_trigger_config(
            input.category,
            input.threshold_value,
            input.duration_hours,
            input.payout_amount,
        )?;

        if self.store.get_location(input.location_id)?.is_none() {
            return Err(AppError::not_found("Location"));
        }

        let trigger = ParametricTrigger {
            id: Uuid::new_v4(),
            location_id: input.location_id,
            category: input.category,
            threshold_value: input.threshold_value,
            threshold_operator: input.threshold_operator,
            duration_hours: input.duration_hours,
            active: input.active,
            payout_amount: input.payout_amount,
            created_at: Utc::now(),
        };

        self.store.insert_trigger(trigger.clone())?;
        tracing::info!(
            trigger_id = %trigger.id,
            location_id = %trigger.location_id,
            category = %trigger.category,
            "Trigger registered: {} {} {}",
            trigger.category,
            trigger.threshold_operator,
            trigger.threshold_value
        );
        Ok(trigger)
    }

    /// Get trigger details
    pub async fn get_trigger(&self, trigger_id: Uuid) -> AppResult<ParametricTrigger> {
        self.store
            .get_trigger(trigger_id)?
            .ok_or_else(|| AppError::not_found("Trigger"))
    }

    /// List all triggers for a location
    pub async fn list_location_triggers(&self, location_id: Uuid) -> AppResult<Vec<ParametricTrigger>> {
        if self.store.get_location(location_id)?.is_none() {
            return Err(AppError::not_found("Location"));
        }
        self.store.list_triggers_for_location(location_id)
    }

    /// Activate or deactivate a trigger
    pub async fn toggle_trigger(&self, trigger_id: Uuid) -> AppResult<ToggleResponse> {
        let trigger = self
            .store
            .toggle_trigger(trigger_id)?
            .ok_or_else(|| AppError::not_found("Trigger"))?;

        tracing::info!(trigger_id = %trigger.id, active = trigger.active, "Trigger toggled");
        Ok(ToggleResponse {
            id: trigger.id,
            active: trigger.active,
        })
    }
}
