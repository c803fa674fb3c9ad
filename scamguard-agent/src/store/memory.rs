//! In-memory storage implementation

use std::collections::HashMap;
use std::sync::RwLock;

use super::{CacheEntry, Settings, SettingsStore, StateStore, StoreResult};

/// In-memory store implementing both scopes (tests and ephemeral dev runs).
pub struct MemoryStore {
    settings: RwLock<Settings>,
    cache: RwLock<HashMap<String, CacheEntry>>,
    last_notified: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(Settings::default()),
            cache: RwLock::new(HashMap::new()),
            last_notified: RwLock::new(None),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for MemoryStore {
    fn settings(&self) -> StoreResult<Settings> {
        Ok(self.settings.read().unwrap().clone())
    }

    fn put_settings(&self, settings: &Settings) -> StoreResult<()> {
        *self.settings.write().unwrap() = settings.clone();
        Ok(())
    }
}

impl StateStore for MemoryStore {
    fn cache_get(&self, key: &str) -> StoreResult<Option<CacheEntry>> {
        Ok(self.cache.read().unwrap().get(key).cloned())
    }

    fn cache_put(&self, entry: &CacheEntry) -> StoreResult<()> {
        self.cache
            .write()
            .unwrap()
            .insert(entry.key.clone(), entry.clone());
        Ok(())
    }

    fn last_notified_alert(&self) -> StoreResult<Option<String>> {
        Ok(self.last_notified.read().unwrap().clone())
    }

    fn set_last_notified_alert(&self, alert_id: &str) -> StoreResult<()> {
        *self.last_notified.write().unwrap() = Some(alert_id.to_string());
        Ok(())
    }
}
