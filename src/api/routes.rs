//! API Routes
//!
//! Configures the Axum router with the proxy and data endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    bilibili_image_handler, bilibili_video_handler, cache_stats_handler, clear_cache_handler,
    feeds_handler, friend_posts_handler, health_handler, moments_handler, qq_music_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/bilibili-image?url=` - Proxied image bytes
/// - `GET /api/bilibili-video?bvid=` - Video metadata
/// - `GET /api/qq-music?song_mid=` - Song details
/// - `GET /api/moments` - Cached timeline entries
/// - `GET /api/friend-posts` - Cached friend-feed entries
/// - `GET /api/feeds` - Feed groups
/// - `GET /api/cache/stats` - Cache statistics
/// - `DELETE /api/cache?key=` - Drop one or all cached data sets
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/bilibili-image", get(bilibili_image_handler))
        .route("/api/bilibili-video", get(bilibili_video_handler))
        .route("/api/qq-music", get(qq_music_handler))
        .route("/api/moments", get(moments_handler))
        .route("/api/friend-posts", get(friend_posts_handler))
        .route("/api/feeds", get(feeds_handler))
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/api/cache", delete(clear_cache_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
