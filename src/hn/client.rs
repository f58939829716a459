//! HTTP client for the public Hacker News Firebase API.

use crate::error::{HnError, Result};
use crate::hn::models::{Story, StoryId};
use crate::hn::source::StorySource;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

pub struct HnClient {
    http: Client,
    base_url: String,
}

impl HnClient {
    /// Builds a client with a per-request timeout. A hung upstream call is
    /// bounded by this timeout rather than stalling a retrieval cycle
    /// indefinitely.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HnError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_top_ids(&self) -> Result<Vec<StoryId>> {
        let url = format!("{}/topstories.json", self.base_url);
        debug!("GET {}", url);

        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(HnError::Listing(format!(
                "top stories listing returned HTTP {}",
                resp.status()
            )));
        }
        let body = resp.text().await?;
        let ids = serde_json::from_str::<Vec<StoryId>>(&body)?;
        Ok(ids)
    }

    async fn fetch_story(&self, id: StoryId) -> Result<Option<Story>> {
        let url = format!("{}/item/{}.json", self.base_url, id);
        debug!("GET {}", url);

        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(HnError::Network(format!(
                "item {} returned HTTP {}",
                id,
                resp.status()
            )));
        }
        // Dead or dangling ids come back as a literal `null` body.
        let body = resp.text().await?;
        let story = serde_json::from_str::<Option<Story>>(&body)?;
        Ok(story)
    }
}

#[async_trait]
impl StorySource for HnClient {
    async fn top_story_ids(&self) -> Result<Vec<StoryId>> {
        self.fetch_top_ids().await.map_err(|e| match e {
            HnError::Listing(_) => e,
            other => HnError::Listing(other.to_string()),
        })
    }

    async fn story(&self, id: StoryId) -> Option<Story> {
        match self.fetch_story(id).await {
            Ok(story) => story,
            Err(e) => {
                warn!("Dropping story {}: {}", id, e);
                None
            }
        }
    }
}
