//! SQLite-based storage implementation

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{CacheEntry, Settings, SettingsStore, StateStore, StoreResult};
use crate::error::AgentError;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Row key for the single settings record.
const SETTINGS_KEY: &str = "settings";

/// Row key for the watchlist dedup marker.
const LAST_NOTIFIED_KEY: &str = "last_notified_alert_id";

/// SQLite-based store implementing both SettingsStore and StateStore
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path
    pub fn open(path: &str) -> Result<Self, AgentError> {
        let conn = Connection::open(path).map_err(|e| AgentError::Internal(e.to_string()))?;
        Self::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run database migrations
    fn migrate(conn: &Connection) -> Result<(), AgentError> {
        let current_version = Self::get_schema_version(conn)?;

        if current_version < SCHEMA_VERSION {
            tracing::info!(
                current = current_version,
                target = SCHEMA_VERSION,
                "Running database migrations"
            );

            if current_version < 1 {
                Self::migrate_v1(conn)?;
            }

            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )
            .map_err(|e| AgentError::Internal(e.to_string()))?;

            tracing::info!("Database migrations complete");
        }

        Ok(())
    }

    /// Get current schema version (0 if no schema exists)
    fn get_schema_version(conn: &Connection) -> Result<i32, AgentError> {
        let table_exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
                [],
                |row| row.get(0),
            )
            .map_err(|e| AgentError::Internal(e.to_string()))?;

        if !table_exists {
            return Ok(0);
        }

        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0).map(|v| v.unwrap_or(0))
        })
        .map_err(|e| AgentError::Internal(e.to_string()))
    }

    /// Migration to version 1: initial schema
    fn migrate_v1(conn: &Connection) -> Result<(), AgentError> {
        conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Synced settings scope, one JSON record
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            -- Scan result cache, one row per subject key
            CREATE TABLE IF NOT EXISTS scan_cache (
                key TEXT PRIMARY KEY,
                result TEXT NOT NULL,
                stored_at TEXT NOT NULL
            );

            -- Local scalar state (watchlist dedup marker)
            CREATE TABLE IF NOT EXISTS agent_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| AgentError::Internal(e.to_string()))
    }

    fn get_state(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT value FROM agent_state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| AgentError::Internal(e.to_string()))
    }

    fn put_state(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO agent_state (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e| AgentError::Internal(e.to_string()))?;
        Ok(())
    }
}

impl SettingsStore for SqliteStore {
    fn settings(&self) -> StoreResult<Settings> {
        let conn = self.conn.lock().unwrap();
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![SETTINGS_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| AgentError::Internal(e.to_string()))?;

        match raw {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| AgentError::Internal(e.to_string()))
            }
            None => Ok(Settings::default()),
        }
    }

    fn put_settings(&self, settings: &Settings) -> StoreResult<()> {
        let json =
            serde_json::to_string(settings).map_err(|e| AgentError::Internal(e.to_string()))?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![SETTINGS_KEY, json],
        )
        .map_err(|e| AgentError::Internal(e.to_string()))?;
        Ok(())
    }
}

impl StateStore for SqliteStore {
    fn cache_get(&self, key: &str) -> StoreResult<Option<CacheEntry>> {
        let conn = self.conn.lock().unwrap();
        let row: Option<(String, String)> = conn
            .query_row(
                "SELECT result, stored_at FROM scan_cache WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| AgentError::Internal(e.to_string()))?;

        let Some((result_json, stored_at)) = row else {
            return Ok(None);
        };

        let result = serde_json::from_str(&result_json)
            .map_err(|e| AgentError::Internal(e.to_string()))?;
        let stored_at = DateTime::parse_from_rfc3339(&stored_at)
            .map_err(|e| AgentError::Internal(e.to_string()))?
            .with_timezone(&Utc);

        Ok(Some(CacheEntry {
            key: key.to_string(),
            result,
            stored_at,
        }))
    }

    fn cache_put(&self, entry: &CacheEntry) -> StoreResult<()> {
        let result_json = serde_json::to_string(&entry.result)
            .map_err(|e| AgentError::Internal(e.to_string()))?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO scan_cache (key, result, stored_at) VALUES (?1, ?2, ?3)",
            params![entry.key, result_json, entry.stored_at.to_rfc3339()],
        )
        .map_err(|e| AgentError::Internal(e.to_string()))?;
        Ok(())
    }

    fn last_notified_alert(&self) -> StoreResult<Option<String>> {
        self.get_state(LAST_NOTIFIED_KEY)
    }

    fn set_last_notified_alert(&self, alert_id: &str) -> StoreResult<()> {
        self.put_state(LAST_NOTIFIED_KEY, alert_id)
    }
}
