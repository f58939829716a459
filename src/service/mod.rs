//! Cache-aside orchestration of the retrieval cycle.

use crate::cache::StoryCache;
use crate::config::Config;
use crate::engine::{self, FetchStrategy};
use crate::error::Result;
use crate::hn::{Story, StorySource};
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

pub struct TopStoriesService {
    source: Arc<dyn StorySource>,
    cache: Arc<StoryCache>,
    refresh_gate: Mutex<()>,
    top_limit: usize,
    concurrency_limit: usize,
}

impl TopStoriesService {
    pub fn new(source: Arc<dyn StorySource>, cache: Arc<StoryCache>, config: &Config) -> Self {
        Self {
            source,
            cache,
            refresh_gate: Mutex::new(()),
            top_limit: config.top_stories_limit,
            concurrency_limit: config.max_concurrent_fetches,
        }
    }

    /// Serves the assembled top-story list, going upstream only when the
    /// cached copy is missing or stale.
    ///
    /// Concurrent callers that miss together share one retrieval: the gate
    /// admits a single refresher, and followers re-read the slot it filled.
    pub async fn top_stories(&self, strategy: FetchStrategy) -> Result<Vec<Story>> {
        if let Some(stories) = self.cache.read().await {
            return Ok(stories);
        }

        let _refresh = self.refresh_gate.lock().await;
        if let Some(stories) = self.cache.read().await {
            return Ok(stories);
        }

        let stories = self.retrieve(strategy).await?;
        self.cache.write(stories.clone()).await;
        Ok(stories)
    }

    /// One full retrieval cycle: list, truncate, resolve, assemble.
    /// A listing failure propagates without touching the cache.
    async fn retrieve(&self, strategy: FetchStrategy) -> Result<Vec<Story>> {
        let started = Instant::now();

        let ranked = self.source.top_story_ids().await.map_err(|e| {
            error!("Top story listing failed, aborting retrieval cycle: {}", e);
            e
        })?;
        let listed = ranked.len();
        let ids: Vec<_> = ranked.into_iter().take(self.top_limit).collect();

        let results =
            engine::resolve_all(Arc::clone(&self.source), &ids, strategy, self.concurrency_limit)
                .await;
        let stories = engine::assemble(results);

        info!(
            "Retrieval cycle ({}): {} of {} listed ids fetched, {} servable stories, took {:?}",
            strategy.as_str(),
            ids.len(),
            listed,
            stories.len(),
            started.elapsed()
        );
        Ok(stories)
    }
}
