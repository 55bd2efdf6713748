//! API Module
//!
//! HTTP handlers and routing for the media proxy and cached data endpoints.
//!
//! # Endpoints
//! - `GET /api/bilibili-image`, `/api/bilibili-video`, `/api/qq-music` - Media proxy
//! - `GET /api/moments`, `/api/friend-posts`, `/api/feeds` - Cached data
//! - `GET /api/cache/stats`, `DELETE /api/cache` - Cache inspection
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
