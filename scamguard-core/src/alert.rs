//! Watchlist alert model
//!
//! Alerts are produced by the backend's monitoring feed and consumed
//! read-only; the agent never persists them beyond the id of the last alert
//! it surfaced.

use serde::{Deserialize, Serialize};

use crate::risk::Severity;

/// One unread monitoring alert, as returned by
/// `monitoring:getMonitoringAlerts` (newest first).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistAlert {
    pub alert_id: String,
    pub severity: Severity,
    pub title: String,
    #[serde(default)]
    pub details: String,
}
