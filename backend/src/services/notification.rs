//! Alert notification delivery
//!
//! Supports:
//! - Structured log output for every alert
//! - Webhook delivery of alert payloads

use async_trait::async_trait;
use shared::{Alert, RiskLevel};

use crate::error::{AppError, AppResult};

/// Sink that receives every alert raised by the monitor
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    /// Notifier name, used in logs
    fn name(&self) -> &str;

    /// Deliver a completed alert
    async fn notify(&self, alert: &Alert) -> AppResult<()>;
}

/// Writes alerts to the tracing log
pub struct LogNotifier;

#[async_trait]
impl AlertNotifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&self, alert: &Alert) -> AppResult<()> {
        match alert.risk_level {
            RiskLevel::High | RiskLevel::Critical => tracing::warn!(
                alert_id = %alert.id,
                location_id = %alert.location_id,
                risk_level = %alert.risk_level,
                "ALERT: {}",
                alert.message
            ),
            RiskLevel::Low | RiskLevel::Medium => tracing::info!(
                alert_id = %alert.id,
                location_id = %alert.location_id,
                risk_level = %alert.risk_level,
                "ALERT: {}",
                alert.message
            ),
        }
        Ok(())
    }
}

/// Posts alerts as JSON to a webhook
#[derive(Clone)]
pub struct WebhookNotifier {
    url: String,
    http_client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a new webhook notifier
    pub fn new(url: String) -> Self {
        Self {
            url,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AlertNotifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn notify(&self, alert: &Alert) -> AppResult<()> {
        let response = self
            .http_client
            .post(&self.url)
            .json(alert)
            .send()
            .await
            .map_err(|e| AppError::Notification(format!("webhook request failed: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(AppError::Notification(format!("webhook returned {} - {}", status, body)))
        }
    }
}

/// Fans an alert out to every registered notifier
#[derive(Default)]
pub struct NotificationService {
    notifiers: Vec<Box<dyn AlertNotifier>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log notifier plus a webhook when one is configured
    pub fn from_webhook(webhook_url: Option<String>) -> Self {
        let mut service = Self::new().with_notifier(Box::new(LogNotifier));
        if let Some(url) = webhook_url.filter(|u| !u.trim().is_empty()) {
            service = service.with_notifier(Box::new(WebhookNotifier::new(url)));
        }
        service
    }

    pub fn with_notifier(mut self, notifier: Box<dyn AlertNotifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    pub fn notifier_names(&self) -> Vec<&str> {
        self.notifiers.iter().map(|n| n.name()).collect()
    }

    /// Deliver to every notifier, returning how many failed
    pub async fn dispatch(&self, alert: &Alert) -> usize {
        let mut failures = 0;
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(alert).await {
                failures += 1;
                tracing::warn!(
                    alert_id = %alert.id,
                    notifier = %notifier.name(),
                    error = %e,
                    "Notifier failed to deliver alert"
                );
            }
        }
        failures
    }
}
