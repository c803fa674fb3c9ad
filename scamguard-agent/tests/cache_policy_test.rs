//! Tests for the per-scan-type cache policy: profile scans short-circuit on
//! a fresh hit, everything else always goes remote.

mod common;

use chrono::{TimeDelta, Utc};
use common::{sign_in, test_state};
use scamguard_agent::{dispatch, CacheEntry, StateStore};
use serde_json::json;

#[tokio::test]
async fn fresh_profile_hit_skips_network_and_push() {
    let (state, backend, _) = test_state();
    sign_in(&state);

    let first = dispatch(
        &state,
        json!({ "action": "performScan", "profileUrl": "https://site/u/alice" }),
    )
    .await;
    assert!(first.success);
    assert_eq!(backend.count("scans:scanProfile"), 1);

    let mut events = state.subscribe();
    let second = dispatch(
        &state,
        json!({ "action": "performScan", "profileUrl": "https://site/u/alice" }),
    )
    .await;
    assert!(second.success);

    // Same cached result, no second remote call, no completion push.
    assert_eq!(backend.count("scans:scanProfile"), 1);
    assert_eq!(second.result, first.result);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn stale_profile_entry_triggers_full_refetch() {
    let (state, backend, _) = test_state();
    sign_in(&state);

    let first = dispatch(
        &state,
        json!({ "action": "performScan", "profileUrl": "https://site/u/bob" }),
    )
    .await;
    assert!(first.success);

    // Age the entry past the 24h window.
    let key = "profile:https://site/u/bob";
    let mut entry: CacheEntry = state.store.cache_get(key).unwrap().unwrap();
    entry.stored_at = Utc::now() - TimeDelta::hours(25);
    state.store.cache_put(&entry).unwrap();

    let second = dispatch(
        &state,
        json!({ "action": "performScan", "profileUrl": "https://site/u/bob" }),
    )
    .await;
    assert!(second.success);
    assert_eq!(backend.count("scans:scanProfile"), 2);

    // The refetch overwrote the stale entry.
    let refreshed = state.store.cache_get(key).unwrap().unwrap();
    assert!(Utc::now() - refreshed.stored_at < TimeDelta::minutes(1));
}

#[tokio::test]
async fn link_scans_always_go_remote() {
    let (state, backend, _) = test_state();
    sign_in(&state);

    for _ in 0..2 {
        let envelope = dispatch(
            &state,
            json!({ "action": "scanLink", "url": "http://example.test" }),
        )
        .await;
        assert!(envelope.success);
    }

    assert_eq!(backend.count("security:scanLink"), 2);
}

#[tokio::test]
async fn cached_profile_is_visible_to_get_scan_result() {
    let (state, _, _) = test_state();
    sign_in(&state);

    dispatch(
        &state,
        json!({ "action": "performScan", "profileUrl": "https://site/u/alice" }),
    )
    .await;

    let lookup = dispatch(
        &state,
        json!({ "action": "getScanResult", "profileUrl": "https://site/u/alice" }),
    )
    .await;

    assert!(lookup.success);
    let result = lookup.result.unwrap();
    assert_eq!(result["subjectKey"], "profile:https://site/u/alice");
}

#[tokio::test]
async fn get_scan_result_treats_stale_as_absent() {
    let (state, _, _) = test_state();
    sign_in(&state);

    dispatch(
        &state,
        json!({ "action": "performScan", "profileUrl": "https://site/u/carol" }),
    )
    .await;

    let key = "profile:https://site/u/carol";
    let mut entry = state.store.cache_get(key).unwrap().unwrap();
    entry.stored_at = Utc::now() - TimeDelta::hours(48);
    state.store.cache_put(&entry).unwrap();

    let lookup = dispatch(
        &state,
        json!({ "action": "getScanResult", "profileUrl": "https://site/u/carol" }),
    )
    .await;
    assert!(lookup.success);
    assert_eq!(lookup.result.unwrap(), serde_json::Value::Null);
}
