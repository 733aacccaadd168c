// Shared test doubles for the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use hn_scraper::{ItemSource, RawItem, Result, ScraperError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn valid_item() -> RawItem {
    RawItem {
        by: Some("adams".to_string()),
        title: Some("hitchhiker's guide to the galaxy".to_string()),
        descendants: Some(10),
        score: Some(123),
        url: Some("http://thesite.com/2019/11/article".to_string()),
    }
}

/// In-memory `ItemSource` that records how it was called.
pub struct MockItemSource {
    top_ids: Option<Vec<i64>>,
    default_item: Option<RawItem>,
    items: HashMap<i64, RawItem>,
    unavailable: HashSet<i64>,
    delays: HashMap<i64, Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    fetch_calls: AtomicUsize,
    fetched_ids: Mutex<Vec<i64>>,
}

impl MockItemSource {
    pub fn new(top_ids: Vec<i64>) -> Self {
        Self {
            top_ids: Some(top_ids),
            default_item: None,
            items: HashMap::new(),
            unavailable: HashSet::new(),
            delays: HashMap::new(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            fetched_ids: Mutex::new(Vec::new()),
        }
    }

    /// A source whose top list cannot be read
    pub fn offline() -> Self {
        let mut source = Self::new(Vec::new());
        source.top_ids = None;
        source
    }

    /// Item returned for any id without an explicit entry
    pub fn with_default_item(mut self, item: RawItem) -> Self {
        self.default_item = Some(item);
        self
    }

    pub fn with_item(mut self, id: i64, item: RawItem) -> Self {
        self.items.insert(id, item);
        self
    }

    pub fn with_unavailable(mut self, id: i64) -> Self {
        self.unavailable.insert(id);
        self
    }

    pub fn with_delay(mut self, id: i64, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn fetched_ids(&self) -> Vec<i64> {
        self.fetched_ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItemSource for MockItemSource {
    async fn list_top_ids(&self) -> Result<Vec<i64>> {
        self.top_ids
            .clone()
            .ok_or_else(|| ScraperError::SourceUnavailable("top stories offline".to_string()))
    }

    async fn fetch_item(&self, id: i64) -> Result<RawItem> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetched_ids.lock().unwrap().push(id);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.get(&id).copied().unwrap_or(Duration::from_millis(5));
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.unavailable.contains(&id) {
            return Err(ScraperError::SourceUnavailable(format!("item {} unavailable", id)));
        }

        self.items
            .get(&id)
            .or(self.default_item.as_ref())
            .cloned()
            .ok_or_else(|| ScraperError::SourceUnavailable(format!("item {} not found", id)))
    }
}
