//! Test doubles shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use hyperlocal_backend::config::MonitorConfig;
use hyperlocal_backend::error::{AppError, AppResult};
use hyperlocal_backend::external::WeatherSource;
use hyperlocal_backend::services::AlertNotifier;
use hyperlocal_backend::store::{InMemoryStore, Store};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::{
    Alert, ForecastPoint, Location, ParametricTrigger, ThresholdOperator, TriggerCategory,
    WeatherReading,
};
use uuid::Uuid;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn monitor_config() -> MonitorConfig {
    MonitorConfig {
        check_interval_seconds: 300,
        error_backoff_seconds: 60,
        autostart: false,
    }
}

pub fn location(name: &str) -> Location {
    Location {
        id: Uuid::new_v4(),
        latitude: 13.7563,
        longitude: 100.5018,
        name: name.to_string(),
        insurer_id: "insurer-1".to_string(),
        policy_ids: vec!["POL-001".to_string()],
        created_at: Utc::now(),
    }
}

pub fn trigger(
    location_id: Uuid,
    category: TriggerCategory,
    threshold: &str,
    op: ThresholdOperator,
) -> ParametricTrigger {
    ParametricTrigger {
        id: Uuid::new_v4(),
        location_id,
        category,
        threshold_value: dec(threshold),
        threshold_operator: op,
        duration_hours: 1,
        active: true,
        payout_amount: None,
        created_at: Utc::now(),
    }
}

pub fn reading(location_id: Uuid, rainfall: &str, wind: &str) -> WeatherReading {
    WeatherReading {
        location_id,
        timestamp: Utc::now(),
        temperature: dec("25.0"),
        rainfall: dec(rainfall),
        wind_speed: dec(wind),
        humidity: dec("70.0"),
        pressure: dec("1013.0"),
    }
}

pub fn forecast_point(location_id: Uuid, rainfall: &str, wind: &str) -> ForecastPoint {
    ForecastPoint {
        location_id,
        forecast_time: Utc::now(),
        temperature: dec("25.0"),
        rainfall_probability: dec("60"),
        rainfall_amount: dec(rainfall),
        wind_speed: dec(wind),
        risk_score: Decimal::ZERO,
        potential_triggers: vec![],
    }
}

/// Weather source answering from canned readings
#[derive(Default)]
pub struct FakeWeather {
    readings: Mutex<HashMap<Uuid, WeatherReading>>,
    forecasts: Mutex<HashMap<Uuid, Vec<ForecastPoint>>>,
    failing: Mutex<Vec<Uuid>>,
    delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl FakeWeather {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fetch takes `delay` of (tokio) time
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn set_reading(&self, reading: WeatherReading) {
        self.readings.lock().insert(reading.location_id, reading);
    }

    pub fn set_forecast(&self, location_id: Uuid, points: Vec<ForecastPoint>) {
        self.forecasts.lock().insert(location_id, points);
    }

    pub fn fail_for(&self, location_id: Uuid) {
        self.failing.lock().push(location_id);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherSource for FakeWeather {
    async fn current_weather(
        &self,
        _latitude: f64,
        _longitude: f64,
        location_id: Uuid,
    ) -> AppResult<WeatherReading> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.lock().contains(&location_id) {
            return Err(AppError::WeatherService("upstream timeout".to_string()));
        }
        Ok(self
            .readings
            .lock()
            .get(&location_id)
            .cloned()
            .unwrap_or_else(|| reading(location_id, "0.0", "0.0")))
    }

    async fn forecast(
        &self,
        _latitude: f64,
        _longitude: f64,
        location_id: Uuid,
    ) -> AppResult<Vec<ForecastPoint>> {
        if self.failing.lock().contains(&location_id) {
            return Err(AppError::WeatherService("upstream timeout".to_string()));
        }
        Ok(self
            .forecasts
            .lock()
            .get(&location_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Store whose location enumeration fails a fixed number of times
pub struct FlakyStore {
    inner: InMemoryStore,
    remaining_failures: AtomicUsize,
}

impl FlakyStore {
    pub fn new(failures: usize) -> Self {
        Self {
            inner: InMemoryStore::new(),
            remaining_failures: AtomicUsize::new(failures),
        }
    }
}

impl Store for FlakyStore {
    fn insert_location(&self, location: Location) -> AppResult<()> {
        self.inner.insert_location(location)
    }

    fn get_location(&self, id: Uuid) -> AppResult<Option<Location>> {
        self.inner.get_location(id)
    }

    fn list_locations(&self) -> AppResult<Vec<Location>> {
        let failing = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(AppError::StorageError("connection reset".to_string()));
        }
        self.inner.list_locations()
    }

    fn add_location_policy(&self, id: Uuid, policy_id: &str) -> AppResult<Option<Location>> {
        self.inner.add_location_policy(id, policy_id)
    }

    fn insert_trigger(&self, trigger: ParametricTrigger) -> AppResult<()> {
        self.inner.insert_trigger(trigger)
    }

    fn get_trigger(&self, id: Uuid) -> AppResult<Option<ParametricTrigger>> {
        self.inner.get_trigger(id)
    }

    fn list_triggers_for_location(&self, location_id: Uuid) -> AppResult<Vec<ParametricTrigger>> {
        self.inner.list_triggers_for_location(location_id)
    }

    fn toggle_trigger(&self, id: Uuid) -> AppResult<Option<ParametricTrigger>> {
        self.inner.toggle_trigger(id)
    }

    fn append_alert(&self, alert: Alert) -> AppResult<()> {
        self.inner.append_alert(alert)
    }

    fn get_alert(&self, id: Uuid) -> AppResult<Option<Alert>> {
        self.inner.get_alert(id)
    }

    fn list_alerts(&self) -> AppResult<Vec<Alert>> {
        self.inner.list_alerts()
    }

    fn resolve_alert(&self, id: Uuid) -> AppResult<Option<Alert>> {
        self.inner.resolve_alert(id)
    }
}

/// Notifier that records every alert it receives
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub received: Arc<Mutex<Vec<Alert>>>,
}

#[async_trait]
impl AlertNotifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, alert: &Alert) -> AppResult<()> {
        self.received.lock().push(alert.clone());
        Ok(())
    }
}

/// Notifier that always fails
pub struct FailingNotifier;

#[async_trait]
impl AlertNotifier for FailingNotifier {
    fn name(&self) -> &str {
        "failing"
    }

    async fn notify(&self, _alert: &Alert) -> AppResult<()> {
        Err(AppError::Notification("webhook returned 503".to_string()))
    }
}

/// Notifier that takes `delay` of (tokio) time before recording an alert
#[derive(Clone)]
pub struct SlowNotifier {
    pub delay: Duration,
    pub received: Arc<Mutex<Vec<Alert>>>,
}

impl SlowNotifier {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            received: Arc::default(),
        }
    }
}

#[async_trait]
impl AlertNotifier for SlowNotifier {
    fn name(&self) -> &str {
        "slow"
    }

    async fn notify(&self, alert: &Alert) -> AppResult<()> {
        tokio::time::sleep(self.delay).await;
        self.received.lock().push(alert.clone());
        Ok(())
    }
}
