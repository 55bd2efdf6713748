//! Cache Store Module
//!
//! Key-value storage with per-entry TTL and lazy expiration on access.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, CachedData};

// == Cache Store ==
/// Heterogeneous cache storage with TTL support.
///
/// Values are stored behind `Arc`, so a read hands back the very allocation
/// that was written. There is no size bound and no background sweep; an
/// expired entry is removed the first time it is read.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with the given default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a value, overwriting any existing entry and resetting its clock.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `data` - The shared value
    /// * `ttl` - Maximum age (uses the default TTL if None)
    pub fn set<T: Any + Send + Sync>(
        &mut self,
        key: impl Into<String>,
        data: Arc<T>,
        ttl: Option<Duration>,
    ) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.insert(key.into(), CacheEntry::new(data, Some(ttl)));
    }

    /// Stores a value that never expires.
    pub fn set_without_expiry<T: Any + Send + Sync>(
        &mut self,
        key: impl Into<String>,
        data: Arc<T>,
    ) {
        self.insert(key.into(), CacheEntry::new(data, None));
    }

    fn insert(&mut self, key: String, entry: CacheEntry) {
        debug!(key = %key, ttl = ?entry.ttl, "Cache entry stored");
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if present, not expired and of type `T`. Expired
    /// entries are removed as a side effect. A type mismatch returns None and
    /// leaves the entry in place.
    pub fn get<T: Any + Send + Sync>(&mut self, key: &str) -> Option<Arc<T>> {
        let data = match self.valid_data(key) {
            Some(data) => data,
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        match data.downcast::<T>() {
            Ok(value) => {
                self.stats.record_hit();
                Some(value)
            }
            Err(_) => {
                debug!(key, "Cache entry holds a different type");
                self.stats.record_miss();
                None
            }
        }
    }

    // == Has Valid ==
    /// Returns true if a valid entry exists, evicting it if expired.
    pub fn has_valid(&mut self, key: &str) -> bool {
        self.valid_data(key).is_some()
    }

    fn valid_data(&mut self, key: &str) -> Option<CachedData> {
        let now = Instant::now();
        let entry = self.entries.get(key)?;

        if entry.is_valid_at(now) {
            return Some(entry.data.clone());
        }

        self.entries.remove(key);
        self.stats.record_expiration();
        self.stats.set_total_entries(self.entries.len());
        debug!(key, "Cache entry expired and evicted");
        None
    }

    // == Clear ==
    /// Removes one entry, or every entry when `key` is None.
    pub fn clear(&mut self, key: Option<&str>) {
        match key {
            Some(key) => {
                self.entries.remove(key);
            }
            None => self.entries.clear(),
        }
        self.stats.set_total_entries(self.entries.len());
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of stored entries, including expired ones not yet accessed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
