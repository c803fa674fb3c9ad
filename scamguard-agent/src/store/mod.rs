//! Storage abstractions for the agent
//!
//! Two scopes, matching what the extension runtime syncs: the settings scope
//! (credential, backend URL, preference flags) follows the user across
//! installs; the state scope (scan cache, poller dedup marker) is local to
//! this host. The cache and the last-notified marker are the only state this
//! layer durably owns.

pub mod memory;
pub mod models;
pub mod sqlite;

pub use memory::MemoryStore;
pub use models::{CacheEntry, Settings};
pub use sqlite::SqliteStore;

use crate::error::AgentError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, AgentError>;

/// Synced settings scope.
pub trait SettingsStore: Send + Sync {
    /// Read the full settings record (defaults if never written).
    fn settings(&self) -> StoreResult<Settings>;

    /// Replace the settings record.
    fn put_settings(&self, settings: &Settings) -> StoreResult<()>;
}

/// Local state scope: scan result cache plus watchlist dedup marker.
pub trait StateStore: Send + Sync {
    /// Read the cache entry for a subject key, stale or not.
    fn cache_get(&self, key: &str) -> StoreResult<Option<CacheEntry>>;

    /// Write a cache entry, overwriting any existing entry for the key.
    fn cache_put(&self, entry: &CacheEntry) -> StoreResult<()>;

    /// Id of the most recently surfaced watchlist alert.
    fn last_notified_alert(&self) -> StoreResult<Option<String>>;

    /// Persist the id of the alert about to be surfaced.
    fn set_last_notified_alert(&self, alert_id: &str) -> StoreResult<()>;
}
