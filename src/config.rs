//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheTtls;
use crate::widget::{RetryPolicy, WidgetOptions};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL serving `talk_data.json` and `link_data.json`
    pub data_api_endpoint: String,
    /// URL returning the friend-feed JSON array
    pub friends_endpoint: String,
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// TTL in seconds for timeline entries
    pub moments_ttl: u64,
    /// TTL in seconds for friend-feed entries
    pub friends_ttl: u64,
    /// TTL in seconds for neighbor links
    pub neighbors_ttl: u64,
    /// Interval between widget readiness polls, in milliseconds
    pub widget_poll_interval_ms: u64,
    /// Anchor polls before init gives up
    pub widget_max_attempts: u32,
    /// Delay before the route-change anchor check, in milliseconds
    pub widget_teardown_delay_ms: u64,
    /// DOM id the comment widget mounts on
    pub widget_anchor: String,
    /// Comment backend server
    pub artalk_server: String,
    /// Comment backend site name
    pub artalk_site: String,
    /// Bilibili API base URL
    pub bilibili_api_base: String,
    /// QQ Music API base URL
    pub qq_music_api_base: String,
    /// Outbound request timeout in seconds
    pub upstream_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATA_API_ENDPOINT` - data JSON base URL (default: http://localhost:4000)
    /// - `FRIENDS_ENDPOINT` - friend feed URL (default: http://localhost:4000/api/friends)
    /// - `DEFAULT_TTL`, `MOMENTS_TTL`, `FRIENDS_TTL`, `NEIGHBORS_TTL` - seconds (300/180/300/300)
    /// - `WIDGET_POLL_INTERVAL_MS` (100), `WIDGET_MAX_ATTEMPTS` (10)
    /// - `WIDGET_TEARDOWN_DELAY_MS` (200)
    /// - `WIDGET_ANCHOR` (artalk), `ARTALK_SERVER`, `ARTALK_SITE`
    /// - `BILIBILI_API_BASE`, `QQ_MUSIC_API_BASE`, `UPSTREAM_TIMEOUT` (15)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parsed("SERVER_PORT", defaults.server_port),
            data_api_endpoint: text("DATA_API_ENDPOINT", defaults.data_api_endpoint),
            friends_endpoint: text("FRIENDS_ENDPOINT", defaults.friends_endpoint),
            default_ttl: parsed("DEFAULT_TTL", defaults.default_ttl),
            moments_ttl: parsed("MOMENTS_TTL", defaults.moments_ttl),
            friends_ttl: parsed("FRIENDS_TTL", defaults.friends_ttl),
            neighbors_ttl: parsed("NEIGHBORS_TTL", defaults.neighbors_ttl),
            widget_poll_interval_ms: parsed(
                "WIDGET_POLL_INTERVAL_MS",
                defaults.widget_poll_interval_ms,
            ),
            widget_max_attempts: parsed("WIDGET_MAX_ATTEMPTS", defaults.widget_max_attempts),
            widget_teardown_delay_ms: parsed(
                "WIDGET_TEARDOWN_DELAY_MS",
                defaults.widget_teardown_delay_ms,
            ),
            widget_anchor: text("WIDGET_ANCHOR", defaults.widget_anchor),
            artalk_server: text("ARTALK_SERVER", defaults.artalk_server),
            artalk_site: text("ARTALK_SITE", defaults.artalk_site),
            bilibili_api_base: text("BILIBILI_API_BASE", defaults.bilibili_api_base),
            qq_music_api_base: text("QQ_MUSIC_API_BASE", defaults.qq_music_api_base),
            upstream_timeout: parsed("UPSTREAM_TIMEOUT", defaults.upstream_timeout),
        }
    }

    /// Per-key TTLs for the data cache.
    pub fn cache_ttls(&self) -> CacheTtls {
        CacheTtls {
            default: Duration::from_secs(self.default_ttl),
            moments: Duration::from_secs(self.moments_ttl),
            friend_posts: Duration::from_secs(self.friends_ttl),
            neighbors: Duration::from_secs(self.neighbors_ttl),
        }
    }

    /// Readiness polling policy for the comment widget.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_millis(self.widget_poll_interval_ms),
            max_attempts: self.widget_max_attempts,
        }
    }

    pub fn teardown_delay(&self) -> Duration {
        Duration::from_millis(self.widget_teardown_delay_ms)
    }

    /// Widget options for a page, pointed at the configured comment backend.
    pub fn widget_options(&self, page_key: &str, page_title: &str) -> WidgetOptions {
        WidgetOptions::new(format!("#{}", self.widget_anchor), page_key, page_title)
            .with_backend(self.artalk_server.clone(), self.artalk_site.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            data_api_endpoint: "http://localhost:4000".to_string(),
            friends_endpoint: "http://localhost:4000/api/friends".to_string(),
            default_ttl: 300,
            moments_ttl: 180,
            friends_ttl: 300,
            neighbors_ttl: 300,
            widget_poll_interval_ms: 100,
            widget_max_attempts: 10,
            widget_teardown_delay_ms: 200,
            widget_anchor: "artalk".to_string(),
            artalk_server: "https://artalk.helong.online".to_string(),
            artalk_site: "Local".to_string(),
            bilibili_api_base: "https://api.bilibili.com".to_string(),
            qq_music_api_base: "https://u.y.qq.com".to_string(),
            upstream_timeout: 15,
        }
    }
}

fn parsed<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn text(name: &str, default: String) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}
