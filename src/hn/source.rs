use crate::error::Result;
use crate::hn::models::{Story, StoryId};
use async_trait::async_trait;

/// Boundary between the retrieval engine and the upstream item store.
#[async_trait]
pub trait StorySource: Send + Sync {
    /// One upstream call returning the full ranked id list, most-ranked
    /// first. Failures here are not swallowed; the caller aborts its cycle.
    async fn top_story_ids(&self) -> Result<Vec<StoryId>>;

    /// Resolve a single id to its detail record. Network failures, non-2xx
    /// statuses and undecodable payloads all collapse to `None`.
    async fn story(&self, id: StoryId) -> Option<Story>;
}
