//! The retrieval engine: interchangeable concurrency policies for resolving
//! a ranked id list into detail records, plus result assembly.

use crate::error::HnError;
use crate::hn::{Story, StoryId, StorySource};
use futures::future::join_all;
use log::debug;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Concurrency policy for turning one id list into N item fetches.
/// Selection is always caller-provided, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// One fetch at a time, in rank order.
    Sequential,
    /// Every fetch in flight at once.
    Unbounded,
    /// Fan-out capped by a fixed pool of semaphore permits.
    Bounded,
}

impl FetchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStrategy::Sequential => "sequential",
            FetchStrategy::Unbounded => "unbounded",
            FetchStrategy::Bounded => "bounded",
        }
    }
}

impl FromStr for FetchStrategy {
    type Err = HnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(FetchStrategy::Sequential),
            "unbounded" => Ok(FetchStrategy::Unbounded),
            "bounded" => Ok(FetchStrategy::Bounded),
            other => Err(HnError::Config(format!("unknown fetch strategy: {}", other))),
        }
    }
}

/// Resolve `ids` to `(id, fetched story)` pairs in input order.
///
/// Results are collected positionally, never by arrival, so completion
/// order of concurrent fetches cannot reorder the output.
pub async fn resolve_all(
    source: Arc<dyn StorySource>,
    ids: &[StoryId],
    strategy: FetchStrategy,
    concurrency_limit: usize,
) -> Vec<(StoryId, Option<Story>)> {
    match strategy {
        FetchStrategy::Sequential => resolve_sequential(source, ids).await,
        FetchStrategy::Unbounded => resolve_unbounded(source, ids).await,
        FetchStrategy::Bounded => resolve_bounded(source, ids, concurrency_limit).await,
    }
}

async fn resolve_sequential(
    source: Arc<dyn StorySource>,
    ids: &[StoryId],
) -> Vec<(StoryId, Option<Story>)> {
    let mut results = Vec::with_capacity(ids.len());
    for &id in ids {
        results.push((id, source.story(id).await));
    }
    results
}

async fn resolve_unbounded(
    source: Arc<dyn StorySource>,
    ids: &[StoryId],
) -> Vec<(StoryId, Option<Story>)> {
    let fetches = ids.iter().map(|&id| {
        let source = Arc::clone(&source);
        async move { (id, source.story(id).await) }
    });
    join_all(fetches).await
}

async fn resolve_bounded(
    source: Arc<dyn StorySource>,
    ids: &[StoryId],
    concurrency_limit: usize,
) -> Vec<(StoryId, Option<Story>)> {
    let gate = Arc::new(Semaphore::new(concurrency_limit));
    let fetches = ids.iter().map(|&id| {
        let source = Arc::clone(&source);
        let gate = Arc::clone(&gate);
        async move {
            // Held until the fetch resolves; dropped on success and failure alike.
            let _permit = gate.acquire_owned().await.expect("semaphore closed");
            (id, source.story(id).await)
        }
    });
    join_all(fetches).await
}

/// Drop absent and incomplete records, keeping survivor order.
pub fn assemble(results: Vec<(StoryId, Option<Story>)>) -> Vec<Story> {
    let mut stories = Vec::with_capacity(results.len());
    for (id, fetched) in results {
        match fetched {
            Some(story) if story.is_valid() => stories.push(story),
            Some(_) => debug!("Skipping story {}: missing title or url", id),
            None => debug!("Skipping story {}: fetch came back empty", id),
        }
    }
    stories
}
