pub mod settings;

pub use settings::Config;

use crate::error::HnError;
use std::sync::Arc;
use url::Url;

/// Loads and returns the application configuration as an `Arc<Config>`.
/// Values that would make the service inoperable are rejected here, before
/// any collaborator is built from them.
pub fn load_config() -> Result<Arc<Config>, HnError> {
    dotenv::dotenv().ok(); // Load .env file if present, ignore errors

    let config = Config::from_env();

    if config.hn_api_base_url.is_empty() {
        return Err(HnError::Config("HN_API_BASE_URL cannot be empty".to_string()));
    }
    Url::parse(&config.hn_api_base_url)
        .map_err(|e| HnError::Config(format!("HN_API_BASE_URL is not a valid URL: {}", e)))?;
    if config.top_stories_limit == 0 {
        return Err(HnError::Config("TOP_STORIES_LIMIT must be positive".to_string()));
    }
    if config.max_concurrent_fetches == 0 {
        return Err(HnError::Config(
            "MAX_CONCURRENT_FETCHES must be positive".to_string(),
        ));
    }

    config.validate_and_log();

    Ok(Arc::new(config))
}
