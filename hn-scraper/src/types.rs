use serde::{Deserialize, Serialize};

use crate::validator::{ValidatedItem, ValidationFailure};

/// Untrusted item record as published by the remote API.
///
/// Every field may be missing, empty or zero; nothing is checked until the
/// record goes through the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub descendants: Option<i64>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl RawItem {
    pub fn author(&self) -> &str {
        self.by.as_deref().unwrap_or("")
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    pub fn comment_count(&self) -> i64 {
        self.descendants.unwrap_or(0)
    }

    pub fn score(&self) -> i64 {
        self.score.unwrap_or(0)
    }
}

/// A story id paired with its 1-based position in the top list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankedId {
    story_id: i64,
    rank: usize,
}

impl RankedId {
    pub fn new(story_id: i64, rank: usize) -> Self {
        Self { story_id, rank }
    }

    pub fn story_id(&self) -> i64 {
        self.story_id
    }

    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// A validated story, ready to hand to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Story {
    pub title: String,
    pub uri: String,
    pub author: String,
    pub points: i64,
    pub comments: i64,
    pub rank: usize,
}

impl Story {
    pub(crate) fn from_validated(item: ValidatedItem, rank: usize) -> Self {
        Self {
            title: item.title,
            uri: item.uri,
            author: item.author,
            points: item.points,
            comments: item.comments,
            rank,
        }
    }
}

/// HTTP client settings. The timeout bounds each request, so a stalled
/// item fetch surfaces as `SourceUnavailable` instead of hanging the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "HackerNewsScraper/1.0".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("{0}")]
    InvalidPostItemProperty(#[from] ValidationFailure),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScraperError>;
