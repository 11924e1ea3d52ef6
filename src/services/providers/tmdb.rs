/// TMDB (The Movie Database) provider
///
/// API Flow:
/// 1. Discover: /discover/movie?with_genres=a,b → popular movies in those genres
/// 2. Details: /movie/{id} and /movie/{id}/credits, fetched concurrently
/// 3. Watch providers: /movie/{id}/watch/providers → per-region streaming sources
///
/// Only the US region is read for watch providers.
use crate::{
    error::{AppError, AppResult},
    models::{
        Movie, MovieDetails, TmdbCredits, TmdbMovieDetails, TmdbPage, TmdbWatchProvidersResponse,
        WatchProviders,
    },
    services::providers::MovieProvider,
};
use reqwest::{Client as HttpClient, StatusCode};

const WATCH_REGION: &str = "US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn discover_url(&self) -> String {
        format!("{}/discover/movie", self.api_url)
    }

    fn movie_url(&self, movie_id: u64) -> String {
        format!("{}/movie/{}", self.api_url, movie_id)
    }

    fn credits_url(&self, movie_id: u64) -> String {
        format!("{}/movie/{}/credits", self.api_url, movie_id)
    }

    fn watch_providers_url(&self, movie_id: u64) -> String {
        format!("{}/movie/{}/watch/providers", self.api_url, movie_id)
    }

    /// Sends a GET and decodes the JSON body, mapping non-2xx statuses to errors
    ///
    /// A 404 becomes `NotFound` so unknown movie ids surface as such to clients.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("TMDB resource {}", url)));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

fn genre_filter(genre_ids: &[u32]) -> String {
    genre_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn discover_by_genres(
        &self,
        genre_ids: &[u32],
        min_vote_average: f64,
    ) -> AppResult<Vec<Movie>> {
        let query = [
            ("with_genres", genre_filter(genre_ids)),
            ("sort_by", "popularity.desc".to_string()),
            ("vote_average.gte", min_vote_average.to_string()),
            ("language", "en-US".to_string()),
            ("page", "1".to_string()),
        ];

        let page: TmdbPage = self.get_json(&self.discover_url(), &query).await?;
        let movies: Vec<Movie> = page.results.into_iter().map(Movie::from).collect();

        tracing::info!(
            genres = %genre_filter(genre_ids),
            results = movies.len(),
            "TMDB discover completed"
        );

        Ok(movies)
    }

    async fn movie_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        let movie_url = self.movie_url(movie_id);
        let credits_url = self.credits_url(movie_id);
        let (details, credits) = tokio::try_join!(
            self.get_json::<TmdbMovieDetails>(&movie_url, &[]),
            self.get_json::<TmdbCredits>(&credits_url, &[]),
        )?;

        tracing::info!(movie_id, cast = credits.cast.len(), "TMDB movie details fetched");

        Ok(details.with_credits(credits))
    }

    async fn watch_providers(&self, movie_id: u64) -> AppResult<WatchProviders> {
        let mut response: TmdbWatchProvidersResponse = self
            .get_json(&self.watch_providers_url(movie_id), &[])
            .await?;

        Ok(response
            .results
            .remove(WATCH_REGION)
            .map(WatchProviders::from)
            .unwrap_or_default())
    }

    fn clone_for_task(&self) -> Box<dyn MovieProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
