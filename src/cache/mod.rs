//! Cache Module
//!
//! Provides in-memory caching with per-entry TTL and lazy expiration, plus
//! the typed accessors that memoize remote feed data.

mod data;
mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use data::{
    sort_moments, CacheTtls, DataCache, FRIEND_POSTS_KEY, MOMENTS_KEY, NEIGHBORS_KEY,
};
pub use entry::{CacheEntry, CachedData};
pub use stats::CacheStats;
pub use store::CacheStore;
