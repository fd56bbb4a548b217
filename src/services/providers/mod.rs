/// Movie data providers
///
/// Two lookups feed the recommendation pipeline: titles related to a seed title
/// (TasteDive) and a critic rating per title (OMDb). Both go through the shared
/// [`RequestCache`](crate::cache::RequestCache), so repeated lookups within a
/// process never reach the network twice.
use crate::{error::AppResult, models::Rating};

pub mod omdb;
pub mod tastedive;

pub use omdb::OmdbClient;
pub use tastedive::TasteDiveClient;

/// Source of titles related to a seed title
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RelatedTitleSource: Send + Sync {
    /// Related movie titles in the order the provider returned them
    async fn related_titles(&self, seed_title: &str) -> AppResult<Vec<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Source of a single critic rating per title
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingSource: Send + Sync {
    /// Rating for `title`; a title without a rating rates as [`Rating::NONE`]
    async fn rating(&self, title: &str) -> AppResult<Rating>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
