//! Scriptable in-memory `StorySource` with upstream-call accounting.

use crate::error::{HnError, Result};
use crate::hn::{Story, StoryId, StorySource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// A `StorySource` whose listing and item responses are scripted up front.
///
/// Counters record every upstream interaction so tests can assert how many
/// calls a retrieval cycle actually issued, and how many item fetches were
/// in flight at once.
pub struct MockStorySource {
    ids: Vec<StoryId>,
    stories: HashMap<StoryId, Story>,
    latencies: HashMap<StoryId, Duration>,
    default_latency: Option<Duration>,
    fail_listing: bool,
    listing_calls: AtomicUsize,
    item_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockStorySource {
    pub fn new(ids: Vec<StoryId>) -> Self {
        Self {
            ids,
            stories: HashMap::new(),
            latencies: HashMap::new(),
            default_latency: None,
            fail_listing: false,
            listing_calls: AtomicUsize::new(0),
            item_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// `count` ranked ids (1..=count), each backed by a servable story.
    pub fn with_ranked_stories(count: usize) -> Self {
        let ids: Vec<StoryId> = (1..=count as StoryId).collect();
        let mut mock = Self::new(ids.clone());
        for id in ids {
            mock = mock.with_story(Self::servable_story(id));
        }
        mock
    }

    /// A source whose listing call always fails.
    pub fn failing_listing() -> Self {
        let mut mock = Self::new(Vec::new());
        mock.fail_listing = true;
        mock
    }

    /// A minimal story that passes the title/url validity filter.
    pub fn servable_story(id: StoryId) -> Story {
        Story {
            id,
            title: format!("Story {}", id),
            url: format!("https://example.com/{}", id),
            by: "tester".to_string(),
            score: 1,
        }
    }

    pub fn with_story(mut self, story: Story) -> Self {
        self.stories.insert(story.id, story);
        self
    }

    /// Scripts latency for one id's item fetch.
    pub fn with_latency(mut self, id: StoryId, latency: Duration) -> Self {
        self.latencies.insert(id, latency);
        self
    }

    /// Scripts latency for every item fetch without its own entry.
    pub fn with_uniform_latency(mut self, latency: Duration) -> Self {
        self.default_latency = Some(latency);
        self
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    pub fn item_calls(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }

    /// Peak number of simultaneously outstanding item fetches.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorySource for MockStorySource {
    async fn top_story_ids(&self) -> Result<Vec<StoryId>> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(HnError::Listing("scripted listing failure".to_string()));
        }
        Ok(self.ids.clone())
    }

    async fn story(&self, id: StoryId) -> Option<Story> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        let latency = self
            .latencies
            .get(&id)
            .copied()
            .or(self.default_latency);
        if let Some(latency) = latency {
            sleep(latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.stories.get(&id).cloned()
    }
}
