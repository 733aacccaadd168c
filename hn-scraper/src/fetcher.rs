use crate::traits::ItemSource;
use crate::types::{FetchConfig, RawItem, Result, ScraperError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::debug;

/// `ItemSource` backed by the Hacker News Firebase REST API.
pub struct HttpItemSource {
    client: Client,
    root_url: String,
}

impl HttpItemSource {
    pub fn new(root_url: &str, config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .map_err(|e| ScraperError::Config {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            root_url: root_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let start_time = Instant::now();
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::SourceUnavailable(format!(
                "{}: HTTP {}: {}",
                url,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.json::<T>().await.map_err(|e| unavailable(url, e))?;
        debug!("GET {} done in {}ms", url, start_time.elapsed().as_millis());
        Ok(body)
    }
}

fn unavailable(url: &str, e: reqwest::Error) -> ScraperError {
    ScraperError::SourceUnavailable(format!("{}: {}", url, e))
}

#[async_trait]
impl ItemSource for HttpItemSource {
    async fn list_top_ids(&self) -> Result<Vec<i64>> {
        let url = format!("{}/topstories.json", self.root_url);
        self.get_json(&url).await
    }

    async fn fetch_item(&self, id: i64) -> Result<RawItem> {
        let url = format!("{}/item/{}.json", self.root_url, id);
        // Unknown ids come back as a literal `null`
        self.get_json::<Option<RawItem>>(&url)
            .await?
            .ok_or_else(|| ScraperError::SourceUnavailable(format!("{}: item {} not found", url, id)))
    }
}
