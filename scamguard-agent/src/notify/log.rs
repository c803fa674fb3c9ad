//! Log-based notifier for development

use async_trait::async_trait;

use super::{HostNotification, Notifier};
use crate::error::AgentError;

/// Notifier that prints to the console (for development runs without a host
/// notification channel).
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &HostNotification) -> Result<(), AgentError> {
        println!();
        println!("========================================");
        println!("  WATCHLIST ALERT [{}]", notification.severity.as_str());
        println!("  {}", notification.title);
        println!("  {}", notification.body);
        println!("========================================");
        println!();

        tracing::info!(
            title = %notification.title,
            severity = %notification.severity.as_str(),
            "Host notification raised"
        );

        Ok(())
    }
}
