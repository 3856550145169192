use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::Result;
use crate::domain::Post;
use crate::fetcher::{decode_posts, Fetcher};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpFetcher {
    client: Client,
    url: Url,
}

impl HttpFetcher {
    pub fn new(url: Url) -> Self {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: Url, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent("corkboard/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self { client, url }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let response = self.client.get(self.url.as_str()).send().await?;

        response.error_for_status_ref()?;

        let body = response.bytes().await?;
        decode_posts(&body)
    }
}
