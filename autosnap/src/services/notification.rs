// File: autosnap/src/services/notification.rs
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Proxy};
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::constants::notifications::{ERROR_SUBJECT, FINISHED_SUBJECT, WEBHOOK_TIMEOUT_SECONDS};
use crate::orchestrator::RunSummary;

/// Destination for run reports
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn publish(&self, channel_id: &str, body: &str, subject: &str) -> Result<()>;
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    pub timestamp: DateTime<Utc>,
    pub channel: String,
    pub subject: String,
    pub message: String,
}

/// Posts run reports as JSON to a webhook
pub struct WebhookNotifier {
    webhook_url: String,
    client: Client,
}

impl WebhookNotifier {
    pub fn new(webhook_url: String, proxy_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder().timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECONDS));
        if let Some(proxy_url) = proxy_url {
            let proxy = Proxy::all(&proxy_url)
                .map_err(|e| anyhow!("Invalid proxy '{}': {}", proxy_url, e))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client for WebhookNotifier: {}", e))?;

        Ok(Self {
            webhook_url,
            client,
        })
    }

    pub fn get_webhook_url(&self) -> &str {
        &self.webhook_url
    }

    async fn send_webhook(&self, payload: &NotificationPayload) -> Result<()> {
        match timeout(
            Duration::from_secs(WEBHOOK_TIMEOUT_SECONDS),
            self.client.post(&self.webhook_url).json(payload).send(),
        )
        .await
        {
            Ok(Ok(response)) if response.status().is_success() => {
                info!(
                    "Notification '{}' sent to channel {}",
                    payload.subject, payload.channel
                );
                Ok(())
            }
            Ok(Ok(response)) => Err(anyhow!(
                "Notification webhook returned status {} for '{}'",
                response.status(),
                payload.subject
            )),
            Ok(Err(e)) => Err(anyhow!("Failed to send notification '{}': {}", payload.subject, e)),
            Err(_) => Err(anyhow!("Notification webhook timeout for '{}'", payload.subject)),
        }
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifier {
    async fn publish(&self, channel_id: &str, body: &str, subject: &str) -> Result<()> {
        if self.webhook_url.is_empty() {
            debug!("No webhook URL configured, skipping notification");
            return Ok(());
        }

        let payload = NotificationPayload {
            timestamp: Utc::now(),
            channel: channel_id.to_string(),
            subject: subject.to_string(),
            message: body.to_string(),
        };

        self.send_webhook(&payload).await
    }
}

/// Subjects to publish for a finished run.
///
/// Errors are always reported. Changes are reported only for real runs.
pub fn notification_subjects(summary: &RunSummary, dry_run: bool) -> Vec<&'static str> {
    let mut subjects = Vec::new();
    if summary.has_errors() {
        subjects.push(ERROR_SUBJECT);
    }
    if !dry_run && summary.changes() > 0 {
        subjects.push(FINISHED_SUBJECT);
    }
    subjects
}
