//! Result cache policy
//!
//! Freshness is computed lazily at read time against a 24-hour TTL; stale
//! entries trigger a full re-fetch and are overwritten in place, never
//! partially refreshed or proactively evicted. Only profile scans consult
//! the cache: profile risk changes slowly, while link/email/message scans
//! are explicit one-off requests that always go remote. That asymmetry is
//! intentional and must survive refactors.

use chrono::{DateTime, TimeDelta, Utc};

use scamguard_core::ScanResult;

use crate::store::{CacheEntry, StateStore, StoreResult};

/// Freshness window for cached profile scans.
pub const PROFILE_TTL_HOURS: i64 = 24;

/// Whether an entry is still fresh at `now`.
pub fn is_fresh(entry: &CacheEntry, now: DateTime<Utc>) -> bool {
    now - entry.stored_at < TimeDelta::hours(PROFILE_TTL_HOURS)
}

/// Read the cached result for `key`, treating stale entries as absent.
pub fn lookup<S: StateStore>(
    store: &S,
    key: &str,
    now: DateTime<Utc>,
) -> StoreResult<Option<ScanResult>> {
    let Some(entry) = store.cache_get(key)? else {
        return Ok(None);
    };

    if is_fresh(&entry, now) {
        Ok(Some(entry.result))
    } else {
        tracing::debug!(%key, "cache entry stale");
        Ok(None)
    }
}

/// Write a freshly computed result, overwriting any existing entry.
pub fn store<S: StateStore>(store: &S, result: &ScanResult) -> StoreResult<()> {
    store.cache_put(&CacheEntry {
        key: result.subject_key.clone(),
        result: result.clone(),
        stored_at: Utc::now(),
    })
}
