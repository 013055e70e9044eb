//! Location registration service

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use shared::Location;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Location service for managing insured locations
#[derive(Clone)]
pub struct LocationService {
    store: Arc<dyn Store>,
}

/// Input for registering a location
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationInput {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub insurer_id: String,
    #[serde(default)]
    pub policy_ids: Vec<String>,
}

/// Input for attaching a policy to a location
#[derive(Debug, Deserialize, Validate)]
pub struct AddPolicyInput {
    #[validate(length(min = 1))]
    pub policy_id: String,
}

impl LocationService {
    /// Create a new LocationService instance
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register a new insured location
    pub async fn create_location(&self, input: CreateLocationInput) -> AppResult<Location> {
        input.validate()?;
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Location name cannot be empty".to_string(),
            });
        }

        let mut location = Location {
            id: Uuid::new_v4(),
            latitude: input.latitude,
            longitude: input.longitude,
            name: input.name.trim().to_string(),
            insurer_id: input.insurer_id,
            policy_ids: Vec::new(),
            created_at: Utc::now(),
        };
        for policy_id in &input.policy_ids {
            location.add_policy(policy_id);
        }

        self.store.insert_location(location.clone())?;
        tracing::info!(location_id = %location.id, insurer_id = %location.insurer_id, "Location registered");
        Ok(location)
    }

    /// Get location details
    pub async fn get_location(&self, location_id: Uuid) -> AppResult<Location> {
        self.store
            .get_location(location_id)?
            .ok_or_else(|| AppError::not_found("Location"))
    }

    /// List all locations, optionally filtered by insurer
    pub async fn list_locations(&self, insurer_id: Option<&str>) -> AppResult<Vec<Location>> {
        let locations = self.store.list_locations()?;
        Ok(match insurer_id {
            Some(insurer) => locations
                .into_iter()
                .filter(|l| l.insurer_id == insurer)
                .collect(),
            None => locations,
        })
    }

    /// Attach a policy to an existing location
    pub async fn add_policy(&self, location_id: Uuid, input: AddPolicyInput) -> AppResult<Location> {
        input.validate()?;
        let policy_id = input.policy_id.trim();
        if policy_id.is_empty() {
            return Err(AppError::ValidationError("Policy id cannot be blank".to_string()));
        }
        self.store
            .add_location_policy(location_id, policy_id)?
            .ok_or_else(|| AppError::not_found("Location"))
    }
}
