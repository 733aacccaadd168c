use crate::types::{RawItem, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for the remote content API the pipeline reads from.
///
/// Both calls are stateless and may run concurrently. Implementations report
/// every transport, status or decoding failure as `SourceUnavailable`.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Full list of top story ids, best-ranked first
    async fn list_top_ids(&self) -> Result<Vec<i64>>;

    /// Fetch a single item record by id
    async fn fetch_item(&self, id: i64) -> Result<RawItem>;
}

#[async_trait]
impl<T: ItemSource + ?Sized> ItemSource for Arc<T> {
    async fn list_top_ids(&self) -> Result<Vec<i64>> {
        (**self).list_top_ids().await
    }

    async fn fetch_item(&self, id: i64) -> Result<RawItem> {
        (**self).fetch_item(id).await
    }
}
