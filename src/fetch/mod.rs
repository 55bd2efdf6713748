//! Remote data sources
//!
//! The data cache never talks to the network directly; it goes through a
//! [`FeedSource`], so tests can substitute a stub.

mod http;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::{FriendPost, Moment, NeighborLink};

pub use http::HttpFeedSource;

/// Outbound fetches backing the cached data accessors.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Timeline entries, in provider order.
    async fn fetch_moments(&self) -> Result<Vec<Moment>, FetchError>;

    /// Friend-feed entries, in provider order.
    async fn fetch_friend_posts(&self) -> Result<Vec<FriendPost>, FetchError>;

    /// Raw neighbor link records.
    async fn fetch_neighbors(&self) -> Result<Vec<NeighborLink>, FetchError>;
}
