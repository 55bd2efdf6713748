//! reqwest-backed feed source

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::FeedSource;
use crate::config::Config;
use crate::error::FetchError;
use crate::models::{FriendPost, Moment, NeighborLink};

/// Fetches the data JSON files over HTTP.
pub struct HttpFeedSource {
    client: Client,
    data_api_endpoint: String,
    friends_endpoint: String,
}

impl HttpFeedSource {
    pub fn new(
        client: Client,
        data_api_endpoint: impl Into<String>,
        friends_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            data_api_endpoint: data_api_endpoint.into().trim_end_matches('/').to_string(),
            friends_endpoint: friends_endpoint.into(),
        }
    }

    /// Builds a source with its own client honoring the configured timeout.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout))
            .build()?;
        Ok(Self::new(
            client,
            config.data_api_endpoint.clone(),
            config.friends_endpoint.clone(),
        ))
    }

    pub fn moments_url(&self) -> String {
        format!("{}/talk_data.json", self.data_api_endpoint)
    }

    pub fn neighbors_url(&self) -> String {
        format!("{}/link_data.json", self.data_api_endpoint)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "Fetching data feed");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), url, "Data feed returned an error status");
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_moments(&self) -> Result<Vec<Moment>, FetchError> {
        self.get_json(&self.moments_url()).await
    }

    async fn fetch_friend_posts(&self) -> Result<Vec<FriendPost>, FetchError> {
        self.get_json(&self.friends_endpoint).await
    }

    async fn fetch_neighbors(&self) -> Result<Vec<NeighborLink>, FetchError> {
        self.get_json(&self.neighbors_url()).await
    }
}
