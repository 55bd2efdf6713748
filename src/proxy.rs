//! Media Proxy
//!
//! Server-side lookups against third-party media APIs that refuse browser
//! requests without their own Referer. Each call is a single attempt; no
//! retries.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, REFERER, USER_AGENT};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::FetchError;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const BILIBILI_REFERER: &str = "https://www.bilibili.com";
const QQ_MUSIC_REFERER: &str = "https://y.qq.com/";
const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

/// Image bytes plus the content type reported upstream.
#[derive(Debug, Clone)]
pub struct ProxiedImage {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// HTTP client for the bilibili and QQ Music lookups
pub struct MediaProxy {
    client: Client,
    bilibili_api_base: String,
    qq_music_api_base: String,
}

impl MediaProxy {
    pub fn new(
        client: Client,
        bilibili_api_base: impl Into<String>,
        qq_music_api_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            bilibili_api_base: bilibili_api_base.into().trim_end_matches('/').to_string(),
            qq_music_api_base: qq_music_api_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout))
            .build()?;
        Ok(Self::new(
            client,
            config.bilibili_api_base.clone(),
            config.qq_music_api_base.clone(),
        ))
    }

    /// Fetches an image from the bilibili CDN.
    pub async fn bilibili_image(&self, url: &str) -> Result<ProxiedImage, FetchError> {
        debug!(url, "Proxying bilibili image");

        let response = self
            .client
            .get(url)
            .header(REFERER, BILIBILI_REFERER)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), url, "Image upstream returned an error status");
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_IMAGE_TYPE)
            .to_string();

        let data = response.bytes().await?.to_vec();

        debug!(size = data.len(), content_type = %content_type, "Fetched bilibili image");
        Ok(ProxiedImage { data, content_type })
    }

    /// Video metadata for a BV id.
    pub async fn bilibili_video(&self, bvid: &str) -> Result<Value, FetchError> {
        self.get_json(&self.bilibili_video_url(bvid), BILIBILI_REFERER)
            .await
    }

    /// Song details for a QQ Music song mid.
    pub async fn qq_music(&self, song_mid: &str) -> Result<Value, FetchError> {
        self.get_json(&self.qq_music_url(song_mid), QQ_MUSIC_REFERER)
            .await
    }

    pub fn bilibili_video_url(&self, bvid: &str) -> String {
        format!(
            "{}/x/web-interface/view?bvid={}",
            self.bilibili_api_base,
            urlencoding::encode(bvid)
        )
    }

    pub fn qq_music_url(&self, song_mid: &str) -> String {
        let request = json!({
            "comm": { "ct": 24, "cv": 0 },
            "songinfo": {
                "method": "get_song_detail_yqq",
                "param": { "song_mid": song_mid },
                "module": "music.pf_song_detail_svr",
            },
        });

        format!(
            "{}/cgi-bin/musicu.fcg?format=json&data={}",
            self.qq_music_api_base,
            urlencoding::encode(&request.to_string())
        )
    }

    async fn get_json(&self, url: &str, referer: &str) -> Result<Value, FetchError> {
        debug!(url, "Proxying media lookup");

        let response = self
            .client
            .get(url)
            .header(REFERER, referer)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), url, "Media upstream returned an error status");
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}
