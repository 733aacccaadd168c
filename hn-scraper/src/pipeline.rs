use crate::traits::ItemSource;
use crate::types::{RankedId, Result, ScraperError, Story};
use crate::validator;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Fetches the top stories from an `ItemSource`, validates them and returns
/// them in rank order.
///
/// Item fetches run concurrently, at most `max_parallelism` at a time. The
/// limit is held by the pipeline, so it also applies across overlapping
/// `get_top_stories` calls.
pub struct RankedFetchPipeline<S> {
    source: S,
    concurrent_limit: Arc<Semaphore>,
    max_parallelism: usize,
}

impl<S: ItemSource> RankedFetchPipeline<S> {
    pub fn new(source: S, max_parallelism: usize) -> Result<Self> {
        if max_parallelism == 0 {
            return Err(ScraperError::Config {
                message: "max request parallelism must be at least 1".to_string(),
            });
        }

        Ok(Self {
            source,
            concurrent_limit: Arc::new(Semaphore::new(max_parallelism)),
            max_parallelism,
        })
    }

    pub fn max_parallelism(&self) -> usize {
        self.max_parallelism
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Ids of the first `count` top stories, ranked from 1 in source order.
    pub async fn get_top_story_ids(&self, count: usize) -> Result<Vec<RankedId>> {
        let all_ids = self.source.list_top_ids().await?;
        debug!("Source listed {} top ids, taking {}", all_ids.len(), count.min(all_ids.len()));

        Ok(all_ids
            .into_iter()
            .take(count)
            .enumerate()
            .map(|(index, id)| RankedId::new(id, index + 1))
            .collect())
    }

    /// Fetch and validate a single story.
    ///
    /// Fails with `InvalidPostItemProperty` carrying the first broken rule,
    /// or `SourceUnavailable` if the item could not be fetched.
    pub async fn get_story(&self, ranked_id: RankedId) -> Result<Story> {
        let item = {
            let _permit = self
                .concurrent_limit
                .acquire()
                .await
                .map_err(|_| ScraperError::SourceUnavailable("fetch gate closed".to_string()))?;
            self.source.fetch_item(ranked_id.story_id()).await?
        };

        let validated = validator::validate(&item)?;
        Ok(Story::from_validated(validated, ranked_id.rank()))
    }

    /// Top `count` stories sorted by rank.
    ///
    /// Items that fail to fetch or validate are left out; only a failure to
    /// list the top ids fails the whole call.
    pub async fn get_top_stories(&self, count: usize) -> Result<Vec<Story>> {
        let ranked_ids = self.get_top_story_ids(count).await?;
        let requested = ranked_ids.len();

        let outcomes = join_all(ranked_ids.into_iter().map(|ranked_id| async move {
            (ranked_id, self.get_story(ranked_id).await)
        }))
        .await;

        let mut stories: Vec<Story> = outcomes
            .into_iter()
            .filter_map(|(ranked_id, outcome)| match outcome {
                Ok(story) => Some(story),
                Err(e) => {
                    warn!(
                        story_id = ranked_id.story_id(),
                        rank = ranked_id.rank(),
                        "Dropping story: {}",
                        e
                    );
                    None
                }
            })
            .collect();

        stories.sort_by_key(|story| story.rank);

        info!("Fetched {}/{} top stories", stories.len(), requested);
        Ok(stories)
    }
}
