use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Source label of the rating used for ranking
pub const ROTTEN_TOMATOES: &str = "Rotten Tomatoes";

/// Critic score as a percentage in `0..=100`
///
/// Titles without a usable score rate as [`Rating::NONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const NONE: Rating = Rating(0);

    /// Returns `None` for values above 100
    pub fn new(percent: u8) -> Option<Self> {
        (percent <= 100).then_some(Rating(percent))
    }

    /// Parses a percentage string such as `"97%"`
    pub fn parse_percent(value: &str) -> Option<Self> {
        let digits = value.trim().strip_suffix('%')?;
        digits.trim().parse::<u8>().ok().and_then(Rating::new)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A recommended title with the rating it was ranked by
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTitle {
    pub title: String,
    pub rating: Rating,
}

impl RankedTitle {
    pub fn new(title: impl Into<String>, rating: Rating) -> Self {
        Self {
            title: title.into(),
            rating,
        }
    }
}

// ============================================================================
// TasteDive API Types
// ============================================================================

/// Response from the TasteDive similar-items endpoint
///
/// Error responses carry an `error` or `Info` field instead of `Similar` and
/// fail to deserialize into this type.
#[derive(Debug, Clone, Deserialize)]
pub struct SimilarResponse {
    #[serde(rename = "Similar", alias = "similar")]
    pub similar: SimilarResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarResults {
    #[serde(rename = "Results", alias = "results")]
    pub results: Vec<SimilarItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarItem {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Type", alias = "type", default)]
    pub item_type: Option<String>,
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Movie metadata from the OMDb API
///
/// A failed lookup comes back as `{"Response": "False", "Error": "..."}` with
/// every other field absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovie {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default, rename = "imdbID")]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub ratings: Option<Vec<OmdbRating>>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbRating {
    pub source: String,
    pub value: String,
}

impl OmdbMovie {
    /// Rotten Tomatoes score, or [`Rating::NONE`] when the movie has no such
    /// rating or no ratings at all
    pub fn rotten_tomatoes(&self) -> Rating {
        let Some(entry) = self
            .ratings
            .iter()
            .flatten()
            .find(|r| r.source == ROTTEN_TOMATOES)
        else {
            return Rating::NONE;
        };

        Rating::parse_percent(&entry.value).unwrap_or_else(|| {
            tracing::warn!(
                title = ?self.title,
                value = %entry.value,
                "Unparseable Rotten Tomatoes score, rating as 0"
            );
            Rating::NONE
        })
    }
}
