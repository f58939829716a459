// src/main.rs
use hn_top_stories::cache::StoryCache;
use hn_top_stories::config;
use hn_top_stories::hn::HnClient;
use hn_top_stories::server::WebServer;
use hn_top_stories::service::TopStoriesService;
use hn_top_stories::utils::setup_logging;
use log::info;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging().expect("Failed to initialize logging");
    info!("🚀 Hacker News top-stories service starting...");

    // --- Configuration & Initialization ---
    let app_config = config::load_config()?;

    let hn_client = Arc::new(HnClient::new(
        &app_config.hn_api_base_url,
        Duration::from_secs(app_config.fetch_timeout_secs),
    )?);

    let story_cache = Arc::new(StoryCache::new(Duration::from_secs(
        app_config.story_cache_ttl_secs,
    )));

    let service = Arc::new(TopStoriesService::new(
        hn_client,
        story_cache,
        &app_config,
    ));

    let server = WebServer::new(
        app_config.listen_addr.clone(),
        service,
        app_config.default_fetch_strategy,
    );
    server.start().await?;

    Ok(())
}
