/// TasteDive similar-items provider
///
/// Asks for related items restricted to movies and keeps at most `limit` titles
/// in the order the API ranked them.
use crate::{
    cache::{QueryParams, RequestCache},
    error::{AppError, AppResult},
    models::SimilarResponse,
    services::providers::RelatedTitleSource,
};
use serde_json::Value;
use std::sync::Arc;

const MEDIA_TYPE: &str = "movies";
pub const DEFAULT_LIMIT: u32 = 5;

#[derive(Clone)]
pub struct TasteDiveClient {
    cache: Arc<RequestCache>,
    api_url: String,
    api_key: Option<String>,
    limit: u32,
}

impl TasteDiveClient {
    pub fn new(cache: Arc<RequestCache>, api_url: String) -> Self {
        Self {
            cache,
            api_url,
            api_key: None,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    fn query_params(&self, seed_title: &str) -> QueryParams {
        let mut params = QueryParams::new()
            .with("q", seed_title)
            .with("type", MEDIA_TYPE)
            .with("limit", self.limit);
        if let Some(key) = &self.api_key {
            params.insert("k", key.as_str());
        }
        params
    }

    /// Pulls the ordered title list out of a similar-items payload
    fn extract_titles(&self, payload: Value) -> AppResult<Vec<String>> {
        let response: SimilarResponse = serde_json::from_value(payload).map_err(|e| {
            AppError::Schema(format!("Unexpected TasteDive response shape: {}", e))
        })?;

        Ok(response
            .similar
            .results
            .into_iter()
            .map(|item| item.name)
            .take(self.limit as usize)
            .collect())
    }
}

#[async_trait::async_trait]
impl RelatedTitleSource for TasteDiveClient {
    async fn related_titles(&self, seed_title: &str) -> AppResult<Vec<String>> {
        let payload = self
            .cache
            .fetch(&self.api_url, &self.query_params(seed_title))
            .await?;

        let titles = self.extract_titles(payload).map_err(|e| {
            tracing::error!(seed_title = %seed_title, error = %e, "Related title lookup failed");
            e
        })?;

        tracing::info!(
            seed_title = %seed_title,
            results = titles.len(),
            provider = "tastedive",
            "Related titles fetched"
        );

        Ok(titles)
    }

    fn name(&self) -> &'static str {
        "tastedive"
    }
}
