//! End-to-end properties of the retrieval service, exercised over the
//! scriptable mock source.

use hn_top_stories::cache::StoryCache;
use hn_top_stories::config::Config;
use hn_top_stories::engine::FetchStrategy;
use hn_top_stories::hn::{Story, StoryId};
use hn_top_stories::service::TopStoriesService;
use hn_top_stories::testing::MockStorySource;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn test_config() -> Config {
    Config {
        hn_api_base_url: "http://127.0.0.1:0".to_string(),
        top_stories_limit: 200,
        story_cache_ttl_secs: 3600,
        max_concurrent_fetches: 10,
        fetch_timeout_secs: 5,
        listen_addr: "127.0.0.1:0".to_string(),
        default_fetch_strategy: FetchStrategy::Bounded,
    }
}

fn service_over(
    mock: Arc<MockStorySource>,
    cache_ttl: Duration,
) -> (TopStoriesService, Arc<StoryCache>) {
    let cache = Arc::new(StoryCache::new(cache_ttl));
    let service = TopStoriesService::new(mock, Arc::clone(&cache), &test_config());
    (service, cache)
}

#[tokio::test]
async fn fresh_cache_entry_is_served_without_upstream_calls() {
    let mock = Arc::new(MockStorySource::with_ranked_stories(5));
    let (service, cache) = service_over(Arc::clone(&mock), Duration::from_secs(3600));

    let cached = vec![
        MockStorySource::servable_story(101),
        MockStorySource::servable_story(102),
    ];
    cache.write(cached.clone()).await;

    let stories = service.top_stories(FetchStrategy::Bounded).await.unwrap();
    let ids: Vec<StoryId> = stories.iter().map(|s| s.id).collect();

    assert_eq!(ids, vec![101, 102]);
    assert_eq!(mock.listing_calls(), 0);
    assert_eq!(mock.item_calls(), 0);
}

#[tokio::test]
async fn cache_miss_issues_one_listing_call_plus_one_call_per_id() {
    for strategy in [
        FetchStrategy::Sequential,
        FetchStrategy::Unbounded,
        FetchStrategy::Bounded,
    ] {
        let mock = Arc::new(MockStorySource::with_ranked_stories(200));
        let (service, _cache) = service_over(Arc::clone(&mock), Duration::from_secs(3600));

        let stories = service.top_stories(strategy).await.unwrap();

        assert_eq!(stories.len(), 200, "strategy {:?}", strategy);
        assert_eq!(mock.listing_calls(), 1, "strategy {:?}", strategy);
        assert_eq!(mock.item_calls(), 200, "strategy {:?}", strategy);
    }
}

#[tokio::test]
async fn listing_is_truncated_to_the_configured_limit() {
    let mock = Arc::new(MockStorySource::with_ranked_stories(250));
    let (service, _cache) = service_over(Arc::clone(&mock), Duration::from_secs(3600));

    let stories = service.top_stories(FetchStrategy::Bounded).await.unwrap();

    assert_eq!(stories.len(), 200);
    assert_eq!(mock.item_calls(), 200);
}

#[tokio::test]
async fn completion_order_never_reorders_results() {
    for strategy in [FetchStrategy::Unbounded, FetchStrategy::Bounded] {
        // Rank order [5, 1, 9]; scripted latencies make fetches complete
        // in order [1, 9, 5].
        let mock = Arc::new(
            MockStorySource::new(vec![5, 1, 9])
                .with_story(MockStorySource::servable_story(5))
                .with_story(MockStorySource::servable_story(1))
                .with_story(MockStorySource::servable_story(9))
                .with_latency(5, Duration::from_millis(40))
                .with_latency(1, Duration::from_millis(5))
                .with_latency(9, Duration::from_millis(20)),
        );
        let (service, _cache) = service_over(Arc::clone(&mock), Duration::from_secs(3600));

        let stories = service.top_stories(strategy).await.unwrap();
        let ids: Vec<StoryId> = stories.iter().map(|s| s.id).collect();

        assert_eq!(ids, vec![5, 1, 9], "strategy {:?}", strategy);
    }
}

#[tokio::test]
async fn incomplete_stories_are_filtered_out_of_the_result() {
    let no_url = Story {
        id: 2,
        title: "Ask HN: no link here".to_string(),
        ..Default::default()
    };
    let mock = Arc::new(
        MockStorySource::new(vec![1, 2, 3])
            .with_story(MockStorySource::servable_story(1))
            .with_story(no_url)
            .with_story(MockStorySource::servable_story(3)),
    );
    let (service, _cache) = service_over(Arc::clone(&mock), Duration::from_secs(3600));

    let stories = service.top_stories(FetchStrategy::Unbounded).await.unwrap();
    let ids: Vec<StoryId> = stories.iter().map(|s| s.id).collect();

    assert_eq!(ids, vec![1, 3]);
    assert_eq!(mock.item_calls(), 3);
}

#[tokio::test]
async fn bounded_strategy_never_exceeds_the_concurrency_ceiling() {
    let mock = Arc::new(
        MockStorySource::with_ranked_stories(200)
            .with_uniform_latency(Duration::from_millis(5)),
    );
    let (service, _cache) = service_over(Arc::clone(&mock), Duration::from_secs(3600));

    service.top_stories(FetchStrategy::Bounded).await.unwrap();

    assert!(
        mock.max_in_flight() <= 10,
        "peak in-flight fetches was {}",
        mock.max_in_flight()
    );
}

#[tokio::test]
async fn unbounded_strategy_actually_fans_out_past_the_ceiling() {
    let mock = Arc::new(
        MockStorySource::with_ranked_stories(50)
            .with_uniform_latency(Duration::from_millis(5)),
    );
    let (service, _cache) = service_over(Arc::clone(&mock), Duration::from_secs(3600));

    service.top_stories(FetchStrategy::Unbounded).await.unwrap();

    assert!(
        mock.max_in_flight() > 10,
        "peak in-flight fetches was only {}",
        mock.max_in_flight()
    );
}

#[tokio::test]
async fn expired_entry_triggers_a_full_refetch() {
    let mock = Arc::new(MockStorySource::with_ranked_stories(3));
    let (service, _cache) = service_over(Arc::clone(&mock), Duration::from_millis(100));

    service.top_stories(FetchStrategy::Bounded).await.unwrap();
    assert_eq!(mock.listing_calls(), 1);

    // Within the TTL: served from cache.
    service.top_stories(FetchStrategy::Bounded).await.unwrap();
    assert_eq!(mock.listing_calls(), 1);
    assert_eq!(mock.item_calls(), 3);

    // Past the TTL: the stale entry reads as a miss and a new cycle runs.
    tokio::time::sleep(Duration::from_millis(150)).await;
    service.top_stories(FetchStrategy::Bounded).await.unwrap();
    assert_eq!(mock.listing_calls(), 2);
    assert_eq!(mock.item_calls(), 6);
}

#[tokio::test]
async fn listing_failure_propagates_and_leaves_the_cache_unwritten() {
    let mock = Arc::new(MockStorySource::failing_listing());
    let (service, cache) = service_over(Arc::clone(&mock), Duration::from_secs(3600));

    let result = service.top_stories(FetchStrategy::Sequential).await;

    assert!(matches!(result, Err(hn_top_stories::HnError::Listing(_))));
    assert_eq!(mock.item_calls(), 0);
    assert!(cache.read().await.is_none());

    // Nothing was cached, so the next call fails upstream again.
    let retry = service.top_stories(FetchStrategy::Sequential).await;
    assert!(retry.is_err());
    assert_eq!(mock.listing_calls(), 2);
}

#[tokio::test]
async fn concurrent_misses_share_a_single_retrieval() {
    let mock = Arc::new(
        MockStorySource::with_ranked_stories(10)
            .with_uniform_latency(Duration::from_millis(10)),
    );
    let (service, _cache) = service_over(Arc::clone(&mock), Duration::from_secs(3600));
    let service = Arc::new(service);

    let a = {
        let service = Arc::clone(&service);
        async move { service.top_stories(FetchStrategy::Bounded).await }
    };
    let b = {
        let service = Arc::clone(&service);
        async move { service.top_stories(FetchStrategy::Bounded).await }
    };
    let (first, second) = tokio::join!(a, b);

    assert_eq!(first.unwrap().len(), 10);
    assert_eq!(second.unwrap().len(), 10);
    assert_eq!(mock.listing_calls(), 1);
    assert_eq!(mock.item_calls(), 10);
}
