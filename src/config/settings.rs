use crate::engine::FetchStrategy;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub hn_api_base_url: String,
    pub top_stories_limit: usize,
    pub story_cache_ttl_secs: u64,
    pub max_concurrent_fetches: usize,
    pub fetch_timeout_secs: u64,
    pub listen_addr: String,
    pub default_fetch_strategy: FetchStrategy,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            hn_api_base_url: env::var("HN_API_BASE_URL")
                .unwrap_or_else(|_| "https://hacker-news.firebaseio.com/v0".to_string()),
            top_stories_limit: env::var("TOP_STORIES_LIMIT")
                .unwrap_or_else(|_| "200".to_string())
                .parse()
                .unwrap_or(200),
            story_cache_ttl_secs: env::var("STORY_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap_or(3600),
            max_concurrent_fetches: env::var("MAX_CONCURRENT_FETCHES")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            listen_addr: env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            default_fetch_strategy: env::var("DEFAULT_FETCH_STRATEGY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(FetchStrategy::Bounded),
        }
    }

    pub fn validate_and_log(&self) {
        log::info!("Application Configuration Loaded: {:?}", self);
        if self.story_cache_ttl_secs == 0 {
            log::warn!("STORY_CACHE_TTL_SECS is 0; every request will go upstream.");
        }
    }
}
