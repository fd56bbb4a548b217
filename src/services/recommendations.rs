use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use futures::future::try_join_all;

use crate::{
    error::{AppError, AppResult},
    models::RankedTitle,
    services::providers::{RatingSource, RelatedTitleSource},
};

/// Builds rating-ordered recommendations from a list of seed titles
///
/// Related titles for every seed are merged into one candidate set, each
/// candidate is rated, and the candidates are sorted by rating. Any lookup
/// failure aborts the whole run.
#[derive(Clone)]
pub struct RecommendationService {
    related: Arc<dyn RelatedTitleSource>,
    ratings: Arc<dyn RatingSource>,
}

impl RecommendationService {
    pub fn new(related: Arc<dyn RelatedTitleSource>, ratings: Arc<dyn RatingSource>) -> Self {
        Self { related, ratings }
    }

    /// Union of the related titles of every seed, compared by exact string
    ///
    /// The set has no meaningful order; ranking imposes one.
    pub async fn related_for(&self, seed_titles: &[String]) -> AppResult<HashSet<String>> {
        let mut candidates = HashSet::new();

        for seed in seed_titles {
            let titles = self.related.related_titles(seed).await?;
            candidates.extend(titles);
        }

        tracing::debug!(
            seeds = seed_titles.len(),
            candidates = candidates.len(),
            provider = self.related.name(),
            "Candidate titles collected"
        );

        Ok(candidates)
    }

    /// Candidates with their ratings, best first
    pub async fn ranked(&self, seed_titles: &[String]) -> AppResult<Vec<RankedTitle>> {
        let candidates = self.related_for(seed_titles).await?;

        // Lookups run concurrently; the cache keeps it to one request per title
        let ranked = try_join_all(candidates.into_iter().map(|title| async move {
            let rating = self.ratings.rating(&title).await?;
            Ok::<_, AppError>(RankedTitle { title, rating })
        }))
        .await?;

        let ranked = sort_by_rating(ranked);

        tracing::info!(
            seeds = seed_titles.len(),
            recommendations = ranked.len(),
            provider = self.ratings.name(),
            "Recommendations ranked"
        );

        Ok(ranked)
    }

    /// Recommended titles, best first
    pub async fn rank(&self, seed_titles: &[String]) -> AppResult<Vec<String>> {
        Ok(self
            .ranked(seed_titles)
            .await?
            .into_iter()
            .map(|r| r.title)
            .collect())
    }
}

/// Orders by rating, highest first, then by title in descending code point order
///
/// The title tie-break is descending, so equally rated titles come out in
/// reverse alphabetical order.
pub fn sort_by_rating(mut titles: Vec<RankedTitle>) -> Vec<RankedTitle> {
    titles.sort_by(compare_ranked);
    titles
}

fn compare_ranked(a: &RankedTitle, b: &RankedTitle) -> Ordering {
    b.rating
        .cmp(&a.rating)
        .then_with(|| b.title.cmp(&a.title))
}
