//! Webhook notifier
//!
//! Delivers host notifications to an external endpoint (e.g. the desktop
//! notification bridge) as a JSON POST.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{HostNotification, Notifier};
use crate::error::AgentError;

pub struct WebhookNotifier {
    http: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { http, url }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &HostNotification) -> Result<(), AgentError> {
        let response = self
            .http
            .post(&self.url)
            .json(&json!({
                "title": notification.title,
                "body": notification.body,
                "severity": notification.severity.as_str(),
                "priority": notification.priority(),
                "icon": notification.icon(),
            }))
            .send()
            .await
            .map_err(|e| AgentError::Backend(format!("notification webhook failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AgentError::Backend(format!(
                "notification webhook returned HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }
}
