// src/cache.rs
//! Single-slot, TTL-bounded cache for the assembled top-story list.

use crate::hn::Story;
use log::debug;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct CachedStories {
    stories: Vec<Story>,
    stored_at: Instant,
}

/// Cache-aside slot for the one logical resource this service owns.
/// Stale entries are indistinguishable from absence to readers; an entry
/// is only ever superseded by a full successful retrieval, never deleted.
pub struct StoryCache {
    slot: RwLock<Option<CachedStories>>,
    ttl: Duration,
}

impl fmt::Debug for StoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoryCache")
            .field("ttl", &self.ttl)
            .field("slot", &"<cached stories>")
            .finish()
    }
}

impl StoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// Returns the cached list while it is fresh; stale entries read as misses.
    pub async fn read(&self) -> Option<Vec<Story>> {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                debug!(
                    "Cache HIT: {} stories, age {:?}",
                    entry.stories.len(),
                    entry.stored_at.elapsed()
                );
                Some(entry.stories.clone())
            }
            Some(entry) => {
                debug!(
                    "Cache STALE: age {:?} exceeds TTL {:?}",
                    entry.stored_at.elapsed(),
                    self.ttl
                );
                None
            }
            None => {
                debug!("Cache MISS: slot empty");
                None
            }
        }
    }

    /// Replaces the slot with a freshly assembled list.
    pub async fn write(&self, stories: Vec<Story>) {
        debug!("Cache SET: {} stories, TTL {:?}", stories.len(), self.ttl);
        let mut slot = self.slot.write().await;
        *slot = Some(CachedStories {
            stories,
            stored_at: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(id: u64) -> Story {
        Story {
            id,
            title: format!("Story {}", id),
            url: format!("https://example.com/{}", id),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_slot_reads_as_miss() {
        let cache = StoryCache::new(Duration::from_secs(60));
        assert!(cache.read().await.is_none());
    }

    #[tokio::test]
    async fn fresh_entry_reads_back() {
        let cache = StoryCache::new(Duration::from_secs(60));
        cache.write(vec![story(1), story(2)]).await;
        let cached = cache.read().await.unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].id, 1);
    }

    #[tokio::test]
    async fn stale_entry_reads_as_miss() {
        let cache = StoryCache::new(Duration::from_millis(40));
        cache.write(vec![story(1)]).await;
        assert!(cache.read().await.is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(cache.read().await.is_none());
    }
}
