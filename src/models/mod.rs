//! Request, response and record models
//!
//! This module defines the DTOs used for serializing/deserializing HTTP
//! query strings, response bodies and the remote data feeds.

pub mod feed;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use feed::{FeedEntry, FeedGroup, FriendPost, Moment, NeighborLink};
pub use requests::{ClearQuery, ImageQuery, MusicQuery, RefreshQuery, VideoQuery};
pub use responses::{ClearResponse, HealthResponse, StatsResponse};
