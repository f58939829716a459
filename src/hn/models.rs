use serde::{Deserialize, Serialize};

pub type StoryId = u64;

/// One Hacker News item as returned by `/item/{id}.json`.
/// Fields this service does not use are ignored during deserialization;
/// `title` and `url` are frequently absent upstream (job posts, Ask HN,
/// deleted items) and default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Story {
    #[serde(default)]
    pub id: StoryId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub by: String,
    #[serde(default)]
    pub score: i64,
}

impl Story {
    /// A story is servable only when both title and url are present.
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() && !self.url.is_empty()
    }
}

/// Outward projection served by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryView {
    pub title: String,
    pub url: String,
}

impl From<&Story> for StoryView {
    fn from(story: &Story) -> Self {
        Self {
            title: story.title.clone(),
            url: story.url.clone(),
        }
    }
}
