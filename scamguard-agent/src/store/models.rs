//! Data models for agent storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scamguard_core::{ScanResult, Severity};

/// Synced user settings.
///
/// Written by the external sign-in flow (or manually via the settings
/// endpoint); this layer only ever reads them, except to mirror a freshly
/// supplied record. Field names match the extension's storage keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Opaque bearer token for the analysis backend.
    pub auth_token: Option<String>,
    /// Base URL of the analysis backend.
    pub backend_url: Option<String>,
    /// Whether page-context scripts scan profiles automatically.
    pub auto_scan: bool,
    pub notifications_enabled: bool,
    /// Master switch for watchlist alert polling.
    pub watchlist_alerts: bool,
    /// Minimum severity a watchlist alert must reach to be surfaced.
    pub alert_level: Severity,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auth_token: None,
            backend_url: None,
            auto_scan: true,
            notifications_enabled: true,
            watchlist_alerts: true,
            alert_level: Severity::Info,
        }
    }
}

/// A cached scan result. Freshness is decided at read time; entries are never
/// proactively evicted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub result: ScanResult,
    pub stored_at: DateTime<Utc>,
}
