use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::RankedTitle,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub titles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// Recommended titles, best first
    pub recommendations: Vec<String>,
    /// The same titles with the ratings they were ranked by
    pub ranked: Vec<RankedTitle>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    if request.titles.iter().any(|t| t.trim().is_empty()) {
        return Err(AppError::InvalidInput(
            "Seed titles cannot be empty".to_string(),
        ));
    }

    tracing::info!(
        request_id = %request_id,
        seed_count = request.titles.len(),
        "Processing recommendation request"
    );

    let ranked = state.recommender.ranked(&request.titles).await?;
    let recommendations = ranked.iter().map(|r| r.title.clone()).collect();

    tracing::info!(
        request_id = %request_id,
        recommendations = ranked.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse {
        recommendations,
        ranked,
    }))
}
