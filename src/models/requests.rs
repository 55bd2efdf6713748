//! Query DTOs for the HTTP API
//!
//! Defines the query strings accepted by the proxy and data endpoints.

use serde::Deserialize;

/// Query for GET /api/bilibili-image
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageQuery {
    /// Image URL on the bilibili CDN
    pub url: Option<String>,
}

/// Query for GET /api/bilibili-video
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoQuery {
    pub bvid: Option<String>,
}

/// Query for GET /api/qq-music
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MusicQuery {
    pub song_mid: Option<String>,
}

/// Query for the cached data endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshQuery {
    /// Bypass a valid cache entry
    #[serde(default)]
    pub refresh: bool,
}

/// Query for DELETE /api/cache
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearQuery {
    /// Key to drop; everything when absent
    pub key: Option<String>,
}

/// Returns the trimmed parameter, or None when missing or blank.
pub fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
