use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Mood, Recommendation, WatchProviders},
    services::{genres::genres_for, providers::MovieProvider},
};

/// Tuning for mood recommendations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationSettings {
    /// Maximum number of movies returned
    pub limit: usize,
    /// Minimum TMDB vote average
    pub min_vote_average: f64,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            limit: 12,
            min_vote_average: 6.0,
        }
    }
}

/// Generates movie recommendations for a detected mood
///
/// Discovers popular movies in the mood's genres, then looks up where each one can
/// be watched. Watch-provider lookups run in parallel; a failed lookup leaves that
/// movie with no providers rather than failing the whole request.
pub async fn recommend_for_mood(
    provider: Arc<dyn MovieProvider>,
    mood: Mood,
    settings: RecommendationSettings,
) -> AppResult<Vec<Recommendation>> {
    let genres = genres_for(mood);

    tracing::info!(
        mood = %mood,
        provider = provider.name(),
        genres = ?genres,
        "Fetching mood recommendations"
    );

    let mut movies = provider
        .discover_by_genres(genres, settings.min_vote_average)
        .await?;
    movies.truncate(settings.limit);

    let mut tasks = Vec::with_capacity(movies.len());
    for movie in &movies {
        let provider = provider.clone_for_task();
        let movie_id = movie.id;
        tasks.push(tokio::spawn(
            async move { provider.watch_providers(movie_id).await },
        ));
    }

    let mut recommendations = Vec::with_capacity(movies.len());
    let mut failures = 0;

    for (movie, task) in movies.into_iter().zip(tasks) {
        let lookup = task
            .await
            .unwrap_or_else(|e| Err(AppError::Internal(format!("Task join error: {}", e))));

        let providers = match lookup {
            Ok(providers) => providers,
            Err(e) => {
                tracing::warn!(movie_id = movie.id, error = %e, "Watch provider lookup failed");
                failures += 1;
                WatchProviders::default()
            }
        };
        recommendations.push(Recommendation { movie, providers });
    }

    if failures > 0 {
        tracing::warn!(
            success_count = recommendations.len() - failures,
            error_count = failures,
            "Partial watch provider failure"
        );
    }

    Ok(recommendations)
}
