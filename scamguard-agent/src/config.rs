//! Agent configuration

/// Process-level configuration, read once at startup. Everything the user
/// controls at runtime (credential, backend URL, preference flags) lives in
/// the synced settings store instead.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the local message surface listens on
    pub port: u16,

    /// SQLite database path; in-memory stores are used when unset
    pub db_path: Option<String>,

    /// Optional webhook endpoint for host notifications; logged to console
    /// when unset
    pub notify_webhook: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("SCAMGUARD_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            db_path: std::env::var("SCAMGUARD_DB").ok(),
            notify_webhook: std::env::var("SCAMGUARD_NOTIFY_WEBHOOK").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3900,
            db_path: None,
            notify_webhook: None,
        }
    }
}
