use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{MovieDetails, WatchProviders},
    routes::AppState,
};

/// Handler returning a movie's detail page data
pub async fn details(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(movie_id): Path<u64>,
) -> AppResult<Json<MovieDetails>> {
    tracing::info!(request_id = %request_id, movie_id, "Fetching movie details");

    let details = state.movie_provider.movie_details(movie_id).await?;
    Ok(Json(details))
}

/// Handler listing where a movie can be watched
///
/// Unlike recommendations, a failed lookup here is reported to the client.
pub async fn providers(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(movie_id): Path<u64>,
) -> AppResult<Json<WatchProviders>> {
    let providers = state.movie_provider.watch_providers(movie_id).await?;

    tracing::info!(
        request_id = %request_id,
        movie_id,
        streaming = providers.streaming.len(),
        free = providers.free.len(),
        "Watch providers fetched"
    );

    Ok(Json(providers))
}
