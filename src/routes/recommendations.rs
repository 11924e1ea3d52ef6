use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Mood, Recommendation},
    routes::AppState,
    services::{genres::genres_for, recommendations},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub mood: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub mood: Mood,
    pub genre_ids: Vec<u32>,
    pub movies: Vec<Recommendation>,
}

/// Handler for mood-based movie recommendations
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let mood: Mood = params
        .mood
        .parse()
        .map_err(|e: crate::models::UnknownMood| AppError::InvalidInput(e.to_string()))?;

    tracing::info!(request_id = %request_id, mood = %mood, "Processing recommendation request");

    let movies = recommendations::recommend_for_mood(
        state.movie_provider.clone(),
        mood,
        state.recommendation_settings,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        movie_count = movies.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse {
        mood,
        genre_ids: genres_for(mood).to_vec(),
        movies,
    }))
}
