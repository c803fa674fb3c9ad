//! Host notification abstractions

pub mod log;
pub mod webhook;

pub use log::LogNotifier;
pub use webhook::WebhookNotifier;

use async_trait::async_trait;

use scamguard_core::{Severity, WatchlistAlert};

use crate::error::AgentError;

/// A notification raised on the host, severity-mapped to an icon and
/// priority.
#[derive(Debug, Clone)]
pub struct HostNotification {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl HostNotification {
    pub fn from_alert(alert: &WatchlistAlert) -> Self {
        Self {
            title: alert.title.clone(),
            body: alert.details.clone(),
            severity: alert.severity,
        }
    }

    /// Host notification priority (0 = default, 2 = heads-up).
    pub fn priority(&self) -> u8 {
        match self.severity {
            Severity::Info => 0,
            Severity::High => 1,
            Severity::Critical => 2,
        }
    }

    /// Icon asset name for the host notification.
    pub fn icon(&self) -> &'static str {
        match self.severity {
            Severity::Info => "icon-info",
            Severity::High => "icon-warning",
            Severity::Critical => "icon-critical",
        }
    }
}

/// Trait for raising host notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &HostNotification) -> Result<(), AgentError>;
}

/// Allow using Box<dyn Notifier> as a Notifier
#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn notify(&self, notification: &HostNotification) -> Result<(), AgentError> {
        (**self).notify(notification).await
    }
}
