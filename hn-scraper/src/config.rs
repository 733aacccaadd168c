use crate::types::{FetchConfig, Result, ScraperError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_ROOT_URL: &str = "https://hacker-news.firebaseio.com/v0";
pub const DEFAULT_MAX_REQUEST_PARALLELISM: usize = 10;

pub const ROOT_URL_ENV: &str = "HN_ROOT_URL";
pub const MAX_REQUEST_PARALLELISM_ENV: &str = "HN_MAX_REQUEST_PARALLELISM";

/// Settings for a scraper run, read from `settings.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScraperConfig {
    pub root_url: String,
    pub max_request_parallelism: usize,
    pub fetch: FetchConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
            max_request_parallelism: DEFAULT_MAX_REQUEST_PARALLELISM,
            fetch: FetchConfig::default(),
        }
    }
}

impl ScraperConfig {
    /// Load settings from a JSON file, then apply environment overrides.
    ///
    /// A missing file is not an error, defaults are used instead.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Override file settings with values from `lookup` (the process
    /// environment in `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root_url) = lookup(ROOT_URL_ENV) {
            self.root_url = root_url;
        }

        if let Some(value) = lookup(MAX_REQUEST_PARALLELISM_ENV) {
            self.max_request_parallelism = value.trim().parse().map_err(|_| ScraperError::Config {
                message: format!("{} must be a positive integer, got {:?}", MAX_REQUEST_PARALLELISM_ENV, value),
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let root = Url::parse(&self.root_url).map_err(|e| ScraperError::Config {
            message: format!("invalid rootUrl {:?}: {}", self.root_url, e),
        })?;
        if root.scheme() != "http" && root.scheme() != "https" {
            return Err(ScraperError::Config {
                message: format!("rootUrl must be http or https, got {}", root.scheme()),
            });
        }

        if self.max_request_parallelism == 0 {
            return Err(ScraperError::Config {
                message: "maxRequestParallelism must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
