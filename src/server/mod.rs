// src/server/mod.rs
//! HTTP shell exposing the retrieval service.

use crate::engine::FetchStrategy;
use crate::error::HnError;
use crate::hn::StoryView;
use crate::service::TopStoriesService;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use log::{error, info};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TopStoriesService>,
    pub default_strategy: FetchStrategy,
}

pub struct WebServer {
    listen_addr: String,
    state: AppState,
}

impl WebServer {
    pub fn new(
        listen_addr: String,
        service: Arc<TopStoriesService>,
        default_strategy: FetchStrategy,
    ) -> Self {
        let state = AppState {
            service,
            default_strategy,
        };
        Self { listen_addr, state }
    }

    /// Binds the listener and serves until shutdown.
    pub async fn start(self) -> Result<(), HnError> {
        let app = self.create_router();

        let listener = tokio::net::TcpListener::bind(&self.listen_addr)
            .await
            .map_err(|e| HnError::Server(format!("failed to bind {}: {}", self.listen_addr, e)))?;

        info!("🚀 Serving top stories on {}", self.listen_addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| HnError::Server(e.to_string()))
    }

    fn create_router(&self) -> Router {
        Router::new()
            .route("/stories", get(get_stories))
            .route("/stories/sequential", get(get_stories_sequential))
            .route("/stories/unbounded", get(get_stories_unbounded))
            .route("/stories/bounded", get(get_stories_bounded))
            .route("/health", get(health_check))
            .with_state(self.state.clone())
    }
}

type StoriesResponse = Result<Json<Vec<StoryView>>, (StatusCode, Json<Value>)>;

#[derive(Debug, Deserialize)]
struct StoriesQuery {
    strategy: Option<String>,
}

async fn get_stories(
    State(state): State<AppState>,
    Query(query): Query<StoriesQuery>,
) -> StoriesResponse {
    let strategy = match query.strategy.as_deref() {
        Some(raw) => raw.parse::<FetchStrategy>().map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
        })?,
        None => state.default_strategy,
    };
    serve_stories(&state, strategy).await
}

async fn get_stories_sequential(State(state): State<AppState>) -> StoriesResponse {
    serve_stories(&state, FetchStrategy::Sequential).await
}

async fn get_stories_unbounded(State(state): State<AppState>) -> StoriesResponse {
    serve_stories(&state, FetchStrategy::Unbounded).await
}

async fn get_stories_bounded(State(state): State<AppState>) -> StoriesResponse {
    serve_stories(&state, FetchStrategy::Bounded).await
}

async fn serve_stories(state: &AppState, strategy: FetchStrategy) -> StoriesResponse {
    match state.service.top_stories(strategy).await {
        Ok(stories) => Ok(Json(stories.iter().map(StoryView::from).collect())),
        Err(e) => {
            error!("Failed to fetch top stories: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An error occurred while processing the request." })),
            ))
        }
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "hn-top-stories",
    }))
}
