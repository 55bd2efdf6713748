//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify TTL validity, overwrite and clear semantics.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStore};

// == Test Configuration ==
const TEST_DEFAULT_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,32}".prop_map(|s| s)
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,128}".prop_map(|s| s)
}

/// Runs `f` on a runtime whose clock only moves when advanced.
fn with_paused_clock<F: std::future::Future<Output = ()>>(f: F) {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
        .block_on(f)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // An entry is valid exactly while its age does not exceed its TTL.
    #[test]
    fn prop_validity_matches_ttl(ttl_ms in 1u64..1_000_000, elapsed_ms in 0u64..2_000_000) {
        let entry = CacheEntry::new(Arc::new(()), Some(Duration::from_millis(ttl_ms)));
        let now = entry.stored_at + Duration::from_millis(elapsed_ms);

        prop_assert_eq!(entry.is_valid_at(now), elapsed_ms <= ttl_ms);
    }

    // An entry without TTL never expires.
    #[test]
    fn prop_no_ttl_always_valid(elapsed_secs in 0u64..10_000_000) {
        let entry = CacheEntry::new(Arc::new(()), None);
        let now = entry.stored_at + Duration::from_secs(elapsed_secs);

        prop_assert!(entry.is_valid_at(now));
    }

    // get after set returns the value before the TTL elapses and nothing after,
    // and an expired read removes the entry from storage.
    #[test]
    fn prop_get_respects_ttl(
        key in key_strategy(),
        value in value_strategy(),
        ttl_secs in 1u64..600,
        elapsed_secs in 0u64..1200,
    ) {
        let mut observed = None;
        with_paused_clock(async {
            let mut store = CacheStore::new(TEST_DEFAULT_TTL);
            store.set(key.clone(), Arc::new(value.clone()), Some(Duration::from_secs(ttl_secs)));

            tokio::time::advance(Duration::from_secs(elapsed_secs)).await;

            let read = store.get::<String>(&key).map(|v| v.as_str().to_string());
            observed = Some((read, store.len(), store.has_valid(&key)));
        });

        let (read, len, still_valid) = observed.unwrap();
        if elapsed_secs <= ttl_secs {
            prop_assert_eq!(read, Some(value));
            prop_assert_eq!(len, 1);
            prop_assert!(still_valid);
        } else {
            prop_assert_eq!(read, None);
            prop_assert_eq!(len, 0);
            prop_assert!(!still_valid);
        }
    }

    // The second of two immediate writes wins.
    #[test]
    fn prop_overwrite_last_wins(
        key in key_strategy(),
        v1 in value_strategy(),
        v2 in value_strategy(),
    ) {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);
        let ttl = Some(Duration::from_secs(60));

        store.set(key.clone(), Arc::new(v1), ttl);
        store.set(key.clone(), Arc::new(v2.clone()), ttl);

        let read = store.get::<String>(&key).unwrap();
        prop_assert_eq!(read.as_str(), v2.as_str());
        prop_assert_eq!(store.len(), 1);
    }

    // clear(key) removes exactly that key; clear() removes everything.
    #[test]
    fn prop_clear_semantics(keys in prop::collection::vec(key_strategy(), 1..20)) {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);
        let unique: HashSet<String> = keys.iter().cloned().collect();
        for key in &unique {
            store.set(key.clone(), Arc::new(key.clone()), None);
        }

        let victim = keys[0].clone();
        store.clear(Some(&victim));

        prop_assert!(!store.has_valid(&victim));
        for key in unique.iter().filter(|k| **k != victim) {
            prop_assert!(store.has_valid(key), "Key {} should survive", key);
        }
        prop_assert_eq!(store.len(), unique.len() - 1);

        store.clear(None);
        prop_assert!(store.is_empty());
    }
}
