use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{OmdbMovie, Rating},
    routes::AppState,
    services::providers::{RatingSource, RelatedTitleSource},
};

#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    q: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    t: String,
}

#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub title: String,
    pub rating: Rating,
}

fn require_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }
    Ok(())
}

/// Handler for related title lookup
pub async fn related(
    State(state): State<AppState>,
    Query(params): Query<RelatedQuery>,
) -> AppResult<Json<Vec<String>>> {
    require_title(&params.q)?;
    let titles = state.tastedive.related_titles(&params.q).await?;
    Ok(Json(titles))
}

/// Handler for rating lookup
pub async fn rating(
    State(state): State<AppState>,
    Query(params): Query<TitleQuery>,
) -> AppResult<Json<RatingResponse>> {
    require_title(&params.t)?;
    let rating = state.omdb.rating(&params.t).await?;
    Ok(Json(RatingResponse {
        title: params.t,
        rating,
    }))
}

/// Handler for the full metadata record
pub async fn metadata(
    State(state): State<AppState>,
    Query(params): Query<TitleQuery>,
) -> AppResult<Json<OmdbMovie>> {
    require_title(&params.t)?;
    let movie = state.omdb.movie_data(&params.t).await?;
    Ok(Json(movie))
}
