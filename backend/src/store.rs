//! Storage for locations, triggers and alerts
//!
//! The monitor reads locations and triggers and appends alerts while HTTP
//! handlers read and write the same collections, so every collection sits
//! behind its own lock.

use std::collections::HashMap;

use parking_lot::RwLock;
use shared::{Alert, Location, ParametricTrigger};
use uuid::Uuid;

use crate::error::AppResult;

/// Key-value storage used by the services and the monitoring loop.
///
/// Lookups return `Ok(None)` for unknown ids; callers decide whether that
/// is a not-found error.
pub trait Store: Send + Sync {
    fn insert_location(&self, location: Location) -> AppResult<()>;

    fn get_location(&self, id: Uuid) -> AppResult<Option<Location>>;

    fn list_locations(&self) -> AppResult<Vec<Location>>;

    /// Attach a policy id and return the updated location
    fn add_location_policy(&self, id: Uuid, policy_id: &str) -> AppResult<Option<Location>>;

    fn insert_trigger(&self, trigger: ParametricTrigger) -> AppResult<()>;

    fn get_trigger(&self, id: Uuid) -> AppResult<Option<ParametricTrigger>>;

    fn list_triggers_for_location(&self, location_id: Uuid) -> AppResult<Vec<ParametricTrigger>>;

    /// Flip the active flag and return the updated trigger
    fn toggle_trigger(&self, id: Uuid) -> AppResult<Option<ParametricTrigger>>;

    fn append_alert(&self, alert: Alert) -> AppResult<()>;

    fn get_alert(&self, id: Uuid) -> AppResult<Option<Alert>>;

    /// All alerts in the order they were raised
    fn list_alerts(&self) -> AppResult<Vec<Alert>>;

    /// Mark an alert resolved and return it
    fn resolve_alert(&self, id: Uuid) -> AppResult<Option<Alert>>;

    fn active_triggers_for_location(&self, location_id: Uuid) -> AppResult<Vec<ParametricTrigger>> {
        Ok(self
            .list_triggers_for_location(location_id)?
            .into_iter()
            .filter(|t| t.active)
            .collect())
    }
}

/// Process-local store
#[derive(Default)]
pub struct InMemoryStore {
    locations: RwLock<HashMap<Uuid, Location>>,
    triggers: RwLock<HashMap<Uuid, ParametricTrigger>>,
    alerts: RwLock<Vec<Alert>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for InMemoryStore {
    fn insert_location(&self, location: Location) -> AppResult<()> {
        self.locations.write().insert(location.id, location);
        Ok(())
    }

    fn get_location(&self, id: Uuid) -> AppResult<Option<Location>> {
        Ok(self.locations.read().get(&id).cloned())
    }

    fn list_locations(&self) -> AppResult<Vec<Location>> {
        let mut locations: Vec<Location> = self.locations.read().values().cloned().collect();
        locations.sort_by_key(|l| l.created_at);
        Ok(locations)
    }

    fn add_location_policy(&self, id: Uuid, policy_id: &str) -> AppResult<Option<Location>> {
        let mut locations = self.locations.write();
        Ok(locations.get_mut(&id).map(|location| {
            location.add_policy(policy_id);
            location.clone()
        }))
    }

    fn insert_trigger(&self, trigger: ParametricTrigger) -> AppResult<()> {
        self.triggers.write().insert(trigger.id, trigger);
        Ok(())
    }

    fn get_trigger(&self, id: Uuid) -> AppResult<Option<ParametricTrigger>> {
        Ok(self.triggers.read().get(&id).cloned())
    }

    fn list_triggers_for_location(&self, location_id: Uuid) -> AppResult<Vec<ParametricTrigger>> {
        let mut triggers: Vec<ParametricTrigger> = self
            .triggers
            .read()
            .values()
            .filter(|t| t.location_id == location_id)
            .cloned()
            .collect();
        triggers.sort_by_key(|t| t.created_at);
        Ok(triggers)
    }

    fn toggle_trigger(&self, id: Uuid) -> AppResult<Option<ParametricTrigger>> {
        let mut triggers = self.triggers.write();
        Ok(triggers.get_mut(&id).map(|trigger| {
            trigger.active = !trigger.active;
            trigger.clone()
        }))
    }

    fn append_alert(&self, alert: Alert) -> AppResult<()> {
        self.alerts.write().push(alert);
        Ok(())
    }

    fn get_alert(&self, id: Uuid) -> AppResult<Option<Alert>> {
        Ok(self.alerts.read().iter().find(|a| a.id == id).cloned())
    }

    fn list_alerts(&self) -> AppResult<Vec<Alert>> {
        Ok(self.alerts.read().clone())
    }

    fn resolve_alert(&self, id: Uuid) -> AppResult<Option<Alert>> {
        let mut alerts = self.alerts.write();
        Ok(alerts.iter_mut().find(|a| a.id == id).map(|alert| {
            alert.resolved = true;
            alert.clone()
        }))
    }
}
