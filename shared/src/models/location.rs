//! Insured location models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A monitored location registered by an insurer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub insurer_id: String,
    pub policy_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Location {
    /// Attach a policy to the location. Returns false if it was already attached.
    pub fn add_policy(&mut self, policy_id: &str) -> bool {
        if self.policy_ids.iter().any(|p| p == policy_id) {
            return false;
        }
        self.policy_ids.push(policy_id.to_string());
        true
    }
}
