//! Alert query and resolution service

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{Alert, RiskLevel};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Alert service for listing and resolving alerts
#[derive(Clone)]
pub struct AlertService {
    store: Arc<dyn Store>,
}

/// Filters applied when listing alerts
#[derive(Debug, Clone, Deserialize)]
pub struct AlertFilter {
    pub risk_level: Option<RiskLevel>,
    #[serde(default = "default_active_only")]
    pub active_only: bool,
}

fn default_active_only() -> bool {
    true
}

impl Default for AlertFilter {
    fn default() -> Self {
        Self {
            risk_level: None,
            active_only: true,
        }
    }
}

impl AlertFilter {
    fn matches(&self, alert: &Alert) -> bool {
        if self.active_only && alert.resolved {
            return false;
        }
        self.risk_level.map_or(true, |level| alert.risk_level == level)
    }
}

/// Result of resolving an alert
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub id: Uuid,
    pub resolved: bool,
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// List all alerts with optional filtering
    pub async fn list_alerts(&self, filter: &AlertFilter) -> AppResult<Vec<Alert>> {
        Ok(self
            .store
            .list_alerts()?
            .into_iter()
            .filter(|a| filter.matches(a))
            .collect())
    }

    /// Get alerts for a specific location
    pub async fn list_location_alerts(
        &self,
        location_id: Uuid,
        filter: &AlertFilter,
    ) -> AppResult<Vec<Alert>> {
        if self.store.get_location(location_id)?.is_none() {
            return Err(AppError::not_found("Location"));
        }
        Ok(self
            .list_alerts(filter)
            .await?
            .into_iter()
            .filter(|a| a.location_id == location_id)
            .collect())
    }

    /// Get alert details
    pub async fn get_alert(&self, alert_id: Uuid) -> AppResult<Alert> {
        self.store
            .get_alert(alert_id)?
            .ok_or_else(|| AppError::not_found("Alert"))
    }

    /// Mark an alert as resolved
    pub async fn resolve_alert(&self, alert_id: Uuid) -> AppResult<ResolveResponse> {
        let alert = self
            .store
            .resolve_alert(alert_id)?
            .ok_or_else(|| AppError::not_found("Alert"))?;

        tracing::info!(alert_id = %alert.id, location_id = %alert.location_id, "Alert resolved");
        Ok(ResolveResponse {
            id: alert.id,
            resolved: alert.resolved,
        })
    }
}
