//! Data Cache Module
//!
//! Typed accessors that memoize remote feed fetches in a [`CacheStore`].
//!
//! Failed fetches and empty responses are never stored: the caller gets an
//! empty list and the next call fetches again.

use std::cmp::Reverse;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::cache::{CacheStats, CacheStore};
use crate::error::FetchError;
use crate::fetch::FeedSource;
use crate::models::{FeedEntry, FriendPost, Moment};

// == Cache Keys ==
pub const MOMENTS_KEY: &str = "moments-data";
pub const FRIEND_POSTS_KEY: &str = "friend-posts-data";
pub const NEIGHBORS_KEY: &str = "neighbors-data";

// == Cache TTLs ==
/// Expiry windows for each cached data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    /// Applied to entries stored without an explicit TTL
    pub default: Duration,
    pub moments: Duration,
    pub friend_posts: Duration,
    pub neighbors: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            default: Duration::from_secs(5 * 60),
            moments: Duration::from_secs(3 * 60),
            friend_posts: Duration::from_secs(5 * 60),
            neighbors: Duration::from_secs(5 * 60),
        }
    }
}

// == Data Cache ==
/// Memoizing front for a [`FeedSource`].
///
/// Two callers missing the same key at once will both fetch and both write;
/// the last write wins.
pub struct DataCache {
    store: RwLock<CacheStore>,
    source: Arc<dyn FeedSource>,
    ttls: CacheTtls,
}

impl DataCache {
    pub fn new(source: Arc<dyn FeedSource>, ttls: CacheTtls) -> Self {
        Self {
            store: RwLock::new(CacheStore::new(ttls.default)),
            source,
            ttls,
        }
    }

    /// Timeline entries, pinned first, then newest first.
    pub async fn get_moments(&self, force_refresh: bool) -> Arc<Vec<Moment>> {
        self.load(MOMENTS_KEY, self.ttls.moments, force_refresh, || async {
            let mut moments = self.source.fetch_moments().await?;
            sort_moments(&mut moments);
            Ok(moments)
        })
        .await
    }

    /// Friend-feed entries in provider order.
    pub async fn get_friend_posts(&self, force_refresh: bool) -> Arc<Vec<FriendPost>> {
        self.load(FRIEND_POSTS_KEY, self.ttls.friend_posts, force_refresh, || {
            self.source.fetch_friend_posts()
        })
        .await
    }

    /// Neighbor links mapped to feed entries.
    pub async fn get_neighbors(&self, force_refresh: bool) -> Arc<Vec<FeedEntry>> {
        self.load(NEIGHBORS_KEY, self.ttls.neighbors, force_refresh, || async {
            let links = self.source.fetch_neighbors().await?;
            Ok(links.into_iter().map(FeedEntry::from).collect())
        })
        .await
    }

    async fn load<T, F, Fut>(
        &self,
        key: &'static str,
        ttl: Duration,
        force_refresh: bool,
        fetch: F,
    ) -> Arc<Vec<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, FetchError>>,
    {
        if !force_refresh {
            let mut store = self.store.write().await;
            if let Some(cached) = store.get::<Vec<T>>(key) {
                debug!(key, "Serving data from cache");
                return cached;
            }
        }

        match fetch().await {
            Ok(items) if items.is_empty() => {
                debug!(key, "Fetched an empty list, leaving cache untouched");
                Arc::new(Vec::new())
            }
            Ok(items) => {
                let data = Arc::new(items);
                self.store.write().await.set(key, data.clone(), Some(ttl));
                info!(key, count = data.len(), "Cached fresh data");
                data
            }
            Err(err) => {
                error!(key, error = %err, "Failed to fetch data");
                Arc::new(Vec::new())
            }
        }
    }

    /// Returns true if `key` holds a valid entry.
    pub async fn has_valid(&self, key: &str) -> bool {
        self.store.write().await.has_valid(key)
    }

    /// Drops one key, or everything when `key` is None.
    pub async fn clear(&self, key: Option<&str>) {
        self.store.write().await.clear(key);
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}

// == Sorting ==
/// Orders timeline entries pinned first, then by descending date, then by
/// descending id. Entries with unparsable dates sink below dated ones.
pub fn sort_moments(moments: &mut [Moment]) {
    moments.sort_by_cached_key(|m| {
        (
            Reverse(m.is_top),
            Reverse(parse_date(&m.date)),
            Reverse(m.id),
        )
    });
}

fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
