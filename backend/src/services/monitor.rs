//! Parametric monitoring loop
//!
//! Periodically sweeps every registered location: fetches current weather,
//! evaluates the location's active triggers and raises an alert for each
//! trigger that fires. The monitor is an explicit start/stop state machine
//! backed by a cancellable task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use shared::{Location, WeatherReading};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::MonitorConfig;
use crate::error::AppResult;
use crate::external::WeatherSource;
use crate::services::notification::NotificationService;
use crate::services::risk_engine::{assess_trigger, create_alert, TriggerEvaluation};
use crate::store::Store;

/// Monitor lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    Stopped,
    Running,
}

/// Counters for one sweep cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub locations_checked: usize,
    pub locations_failed: usize,
    pub triggers_evaluated: usize,
    pub alerts_raised: usize,
    /// The sweep stopped early because the monitor was cancelled
    pub interrupted: bool,
}

/// State shared between the monitor handle and its background task
struct MonitorContext {
    store: Arc<dyn Store>,
    weather: Arc<dyn WeatherSource>,
    notifications: Arc<NotificationService>,
    check_interval: Duration,
    error_backoff: Duration,
    sweeps_completed: AtomicU64,
}

struct RunningTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns the background sweep task
pub struct ParametricMonitor {
    context: Arc<MonitorContext>,
    task: Mutex<Option<RunningTask>>,
}

impl ParametricMonitor {
    pub fn new(
        store: Arc<dyn Store>,
        weather: Arc<dyn WeatherSource>,
        notifications: Arc<NotificationService>,
        config: &MonitorConfig,
    ) -> Self {
        Self {
            context: Arc::new(MonitorContext {
                store,
                weather,
                notifications,
                check_interval: config.check_interval(),
                error_backoff: config.error_backoff(),
                sweeps_completed: AtomicU64::new(0),
            }),
            task: Mutex::new(None),
        }
    }

    pub fn state(&self) -> MonitorState {
        match self.task.lock().as_ref() {
            Some(task) if !task.handle.is_finished() => MonitorState::Running,
            _ => MonitorState::Stopped,
        }
    }

    /// Number of sweep cycles that ran to completion
    pub fn sweeps_completed(&self) -> u64 {
        self.context.sweeps_completed.load(Ordering::SeqCst)
    }

    /// Start the monitoring loop.
    ///
    /// Returns `false` without spawning anything if the loop is already running.
    pub fn start(&self) -> bool {
        let mut task = self.task.lock();
        if let Some(running) = task.as_ref() {
            if !running.handle.is_finished() {
                tracing::warn!("Parametric monitor already running, ignoring start");
                return false;
            }
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_loop(self.context.clone(), cancel.clone()));
        *task = Some(RunningTask { cancel, handle });

        tracing::info!(
            interval_secs = self.context.check_interval.as_secs(),
            "Parametric monitor started"
        );
        true
    }

    /// Stop the monitoring loop and wait for the task to exit.
    ///
    /// No new sweep starts once this returns. A pending weather fetch is
    /// abandoned, but alerts already raised for a fetched location are
    /// delivered before the task exits. Returns `false` if the loop was not
    /// running.
    pub async fn stop(&self) -> bool {
        let Some(running) = self.task.lock().take() else {
            return false;
        };

        running.cancel.cancel();
        if let Err(e) = running.handle.await {
            tracing::error!(error = %e, "Parametric monitor task ended abnormally");
        }

        tracing::info!(
            sweeps_completed = self.sweeps_completed(),
            "Parametric monitor stopped"
        );
        true
    }

    /// Run a single sweep outside the background loop
    pub async fn sweep_once(&self) -> AppResult<SweepReport> {
        let report = self.context.sweep(&CancellationToken::new()).await?;
        self.context.sweeps_completed.fetch_add(1, Ordering::SeqCst);
        Ok(report)
    }
}

async fn run_loop(context: Arc<MonitorContext>, cancel: CancellationToken) {
    loop {
        let pause = match context.sweep(&cancel).await {
            Ok(report) if report.interrupted => break,
            Ok(report) => {
                let completed = context.sweeps_completed.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::info!(
                    sweep = completed,
                    locations_checked = report.locations_checked,
                    locations_failed = report.locations_failed,
                    triggers_evaluated = report.triggers_evaluated,
                    alerts_raised = report.alerts_raised,
                    "Sweep completed"
                );
                context.check_interval
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    backoff_secs = context.error_backoff.as_secs(),
                    "Monitor sweep failed"
                );
                context.error_backoff
            }
        };

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(pause) => {}
        }
    }
}

impl MonitorContext {
    /// Check every registered location once.
    ///
    /// Failures for a single location are logged and skipped; only a failure
    /// to enumerate locations fails the sweep.
    async fn sweep(&self, cancel: &CancellationToken) -> AppResult<SweepReport> {
        let locations = self.store.list_locations()?;
        let mut report = SweepReport::default();

        for location in &locations {
            if cancel.is_cancelled() {
                report.interrupted = true;
                break;
            }

            // The weather fetch can hang; cancellation must not wait on it
            let fetched = tokio::select! {
                _ = cancel.cancelled() => None,
                result = self.weather.current_weather(
                    location.latitude,
                    location.longitude,
                    location.id,
                ) => Some(result),
            };
            let Some(fetched) = fetched else {
                report.interrupted = true;
                break;
            };

            // Once a reading is in hand the location is finished, alerts included
            report.locations_checked += 1;
            let result = match fetched {
                Ok(reading) => self.check_location(location, &reading, &mut report).await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                report.locations_failed += 1;
                tracing::warn!(
                    location_id = %location.id,
                    location = %location.name,
                    error = %e,
                    "Error checking location"
                );
            }
        }

        Ok(report)
    }

    async fn check_location(
        &self,
        location: &Location,
        reading: &WeatherReading,
        report: &mut SweepReport,
    ) -> AppResult<()> {
        let triggers = self.store.active_triggers_for_location(location.id)?;

        for trigger in &triggers {
            report.triggers_evaluated += 1;
            match assess_trigger(reading, trigger) {
                TriggerEvaluation::Fired { .. } => {
                    let alert = create_alert(reading, trigger);
                    self.store.append_alert(alert.clone())?;
                    report.alerts_raised += 1;
                    self.notifications.dispatch(&alert).await;
                }
                TriggerEvaluation::NotMet { .. } => {}
                TriggerEvaluation::NotApplicable => {
                    tracing::debug!(
                        trigger_id = %trigger.id,
                        category = %trigger.category,
                        "Trigger category has no field in current weather"
                    );
                }
            }
        }

        Ok(())
    }
}
