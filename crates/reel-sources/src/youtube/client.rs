use crate::error::SourceError;
use crate::traits::VideoSearch;
use crate::youtube::api;
use async_trait::async_trait;
use reel_config::VideoConfig;
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct YoutubeClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl YoutubeClient {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client: Arc::new(client),
            base_url,
            api_key,
        }
    }

    pub fn from_config(client: Client, config: &VideoConfig) -> Self {
        Self::new(client, config.base_url.clone(), config.api_key.clone())
    }
}

#[async_trait]
impl VideoSearch for YoutubeClient {
    fn source_name(&self) -> &str {
        api::SOURCE
    }

    async fn search_videos(&self, query: &str) -> Result<Vec<String>, SourceError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        api::search_videos(&self.client, &self.base_url, &self.api_key, query).await
    }
}
