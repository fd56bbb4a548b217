/// OMDb metadata provider
///
/// Looks a movie up by exact title and reads its Rotten Tomatoes score.
use crate::{
    cache::{QueryParams, RequestCache},
    error::{AppError, AppResult},
    models::{OmdbMovie, Rating},
    services::providers::RatingSource,
};
use std::sync::Arc;

const RESPONSE_FORMAT: &str = "json";

#[derive(Clone)]
pub struct OmdbClient {
    cache: Arc<RequestCache>,
    api_url: String,
    api_key: Option<String>,
}

impl OmdbClient {
    pub fn new(cache: Arc<RequestCache>, api_url: String) -> Self {
        Self {
            cache,
            api_url,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    fn query_params(&self, title: &str) -> QueryParams {
        let mut params = QueryParams::new()
            .with("t", title)
            .with("r", RESPONSE_FORMAT);
        if let Some(key) = &self.api_key {
            params.insert("apikey", key.as_str());
        }
        params
    }

    /// Fetches the metadata record for `title`
    ///
    /// A "movie not found" answer is a valid record with no ratings, not an error.
    pub async fn movie_data(&self, title: &str) -> AppResult<OmdbMovie> {
        let payload = self
            .cache
            .fetch(&self.api_url, &self.query_params(title))
            .await?;

        let movie: OmdbMovie = serde_json::from_value(payload).map_err(|e| {
            tracing::error!(title = %title, error = %e, "Failed to parse OMDb response");
            AppError::ExternalApi(format!("Failed to parse OMDb response: {}", e))
        })?;

        if let Some(error) = &movie.error {
            tracing::debug!(title = %title, error = %error, "OMDb lookup returned no movie");
        }

        Ok(movie)
    }
}

#[async_trait::async_trait]
impl RatingSource for OmdbClient {
    async fn rating(&self, title: &str) -> AppResult<Rating> {
        let rating = self.movie_data(title).await?.rotten_tomatoes();

        tracing::debug!(
            title = %title,
            rating = rating.value(),
            provider = "omdb",
            "Rating fetched"
        );

        Ok(rating)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
