use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    cache::{CacheStats, RequestCache},
    config::Config,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{
        providers::{OmdbClient, TasteDiveClient},
        recommendations::RecommendationService,
        transport::Transport,
    },
};

pub mod recommendations;
pub mod titles;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RequestCache>,
    pub tastedive: Arc<TasteDiveClient>,
    pub omdb: Arc<OmdbClient>,
    pub recommender: RecommendationService,
}

impl AppState {
    /// Wires the providers and recommendation service around one request cache
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let cache = Arc::new(RequestCache::new(transport));

        let tastedive = Arc::new(
            TasteDiveClient::new(cache.clone(), config.tastedive_api_url.clone())
                .with_api_key(config.tastedive_api_key.clone())
                .with_limit(config.related_limit),
        );
        let omdb = Arc::new(
            OmdbClient::new(cache.clone(), config.omdb_api_url.clone())
                .with_api_key(config.omdb_api_key.clone()),
        );

        let recommender = RecommendationService::new(tastedive.clone(), omdb.clone());

        Self {
            cache,
            tastedive,
            omdb,
            recommender,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/titles/related", get(titles::related))
        .route("/titles/rating", get(titles::rating))
        .route("/titles/metadata", get(titles::metadata))
        .route("/cache/stats", get(cache_stats))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Request cache statistics
async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats().await)
}
