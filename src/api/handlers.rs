//! API Handlers
//!
//! HTTP request handlers for the media proxy and cached data endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::cache::DataCache;
use crate::config::Config;
use crate::error::{ApiError, FetchError, Result};
use crate::fetch::HttpFeedSource;
use crate::feeds::feed_groups;
use crate::models::requests::required;
use crate::models::{
    ClearQuery, ClearResponse, FeedGroup, FriendPost, HealthResponse, ImageQuery, Moment,
    MusicQuery, RefreshQuery, StatsResponse, VideoQuery,
};
use crate::proxy::MediaProxy;

const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";
const JSON_CACHE_CONTROL: &str = "public, max-age=600";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Memoized feed data
    pub data: Arc<DataCache>,
    /// Third-party media lookups
    pub proxy: Arc<MediaProxy>,
}

impl AppState {
    pub fn new(data: DataCache, proxy: MediaProxy) -> Self {
        Self {
            data: Arc::new(data),
            proxy: Arc::new(proxy),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires the data cache to the HTTP feed source and builds the proxy
    /// client with the configured timeout.
    pub fn from_config(config: &Config) -> std::result::Result<Self, FetchError> {
        let source = HttpFeedSource::from_config(config)?;
        let data = DataCache::new(Arc::new(source), config.cache_ttls());
        let proxy = MediaProxy::from_config(config)?;
        Ok(Self::new(data, proxy))
    }
}

/// Handler for GET /api/bilibili-image?url=
pub async fn bilibili_image_handler(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Result<Response> {
    let url = required(query.url.as_deref()).ok_or(ApiError::MissingParameter("url"))?;

    let image = state.proxy.bilibili_image(url).await.map_err(|err| {
        error!(url, error = %err, "Failed to fetch bilibili image");
        ApiError::Upstream("Failed to fetch image".to_string())
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL.to_string()),
        ],
        image.data,
    )
        .into_response())
}

/// Handler for GET /api/bilibili-video?bvid=
pub async fn bilibili_video_handler(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> Result<Response> {
    let bvid = required(query.bvid.as_deref()).ok_or(ApiError::MissingParameter("bvid"))?;

    let info = state.proxy.bilibili_video(bvid).await.map_err(|err| {
        error!(bvid, error = %err, "Failed to fetch bilibili video info");
        ApiError::Upstream("Failed to fetch video info".to_string())
    })?;

    Ok(([(header::CACHE_CONTROL, JSON_CACHE_CONTROL)], Json(info)).into_response())
}

/// Handler for GET /api/qq-music?song_mid=
pub async fn qq_music_handler(
    State(state): State<AppState>,
    Query(query): Query<MusicQuery>,
) -> Result<Response> {
    let song_mid =
        required(query.song_mid.as_deref()).ok_or(ApiError::MissingParameter("song_mid"))?;

    let info = state.proxy.qq_music(song_mid).await.map_err(|err| {
        error!(song_mid, error = %err, "Failed to fetch QQ Music info");
        ApiError::Upstream("Failed to fetch music info".to_string())
    })?;

    Ok(([(header::CACHE_CONTROL, JSON_CACHE_CONTROL)], Json(info)).into_response())
}

/// Handler for GET /api/moments?refresh=
///
/// Never fails: an unreachable data API yields an empty list.
pub async fn moments_handler(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Json<Vec<Moment>> {
    let moments = state.data.get_moments(query.refresh).await;
    Json(moments.as_ref().clone())
}

/// Handler for GET /api/friend-posts?refresh=
pub async fn friend_posts_handler(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Json<Vec<FriendPost>> {
    let posts = state.data.get_friend_posts(query.refresh).await;
    Json(posts.as_ref().clone())
}

/// Handler for GET /api/feeds
pub async fn feeds_handler(State(state): State<AppState>) -> Json<Vec<FeedGroup>> {
    Json(feed_groups(&state.data).await)
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.data.stats().await))
}

/// Handler for DELETE /api/cache?key=
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Query(query): Query<ClearQuery>,
) -> Json<ClearResponse> {
    let key = required(query.key.as_deref());
    state.data.clear(key).await;
    Json(ClearResponse::new(key))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
