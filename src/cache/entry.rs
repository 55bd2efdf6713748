//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

/// Type-erased payload shared between the store and its readers.
pub type CachedData = Arc<dyn Any + Send + Sync>;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub data: CachedData,
    /// When the entry was written
    pub stored_at: Instant,
    /// Maximum age, None = no expiration
    pub ttl: Option<Duration>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    ///
    /// # Arguments
    /// * `data` - The value to store
    /// * `ttl` - Optional maximum age
    pub fn new(data: CachedData, ttl: Option<Duration>) -> Self {
        Self {
            data,
            stored_at: Instant::now(),
            ttl,
        }
    }

    // == Is Valid ==
    /// Checks whether the entry is still valid at `now`.
    ///
    /// Boundary condition: an entry whose age equals its TTL is still valid;
    /// it expires only once the age strictly exceeds the TTL.
    pub fn is_valid_at(&self, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.saturating_duration_since(self.stored_at) <= ttl,
            None => true,
        }
    }

    /// Checks whether the entry is still valid now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` once the TTL has elapsed
    /// - `Some(remaining)` while the entry is valid
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.ttl.map(|ttl| ttl.saturating_sub(self.stored_at.elapsed()))
    }
}
