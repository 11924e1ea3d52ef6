/// Movie metadata provider abstraction
///
/// Recommendations and movie pages need three lookups from a metadata source:
/// discovering movies by genre, a movie's details, and where it can be watched.
/// Keeping them behind a trait lets the HTTP layer run against TMDB in production
/// and a stub in tests.
use crate::{
    error::AppResult,
    models::{Movie, MovieDetails, WatchProviders},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Popular movies in any of the given genres, best first
    async fn discover_by_genres(
        &self,
        genre_ids: &[u32],
        min_vote_average: f64,
    ) -> AppResult<Vec<Movie>>;

    /// Details, cast and directors for a movie
    ///
    /// Fails with `AppError::NotFound` when the provider has no such movie.
    async fn movie_details(&self, movie_id: u64) -> AppResult<MovieDetails>;

    /// Streaming, rental, purchase and free options for a movie
    async fn watch_providers(&self, movie_id: u64) -> AppResult<WatchProviders>;

    /// Clone provider for parallel task execution
    ///
    /// Required because providers need to be moved into tokio tasks.
    fn clone_for_task(&self) -> Box<dyn MovieProvider>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
