use serde::{Deserialize, Serialize};

use crate::services::genres::genre_name;

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const BACKDROP_BASE_URL: &str = "https://image.tmdb.org/t/p/w1280";
const PROFILE_BASE_URL: &str = "https://image.tmdb.org/t/p/w185";
const MAX_CAST: usize = 10;

fn image_url(base: &str, path: Option<String>) -> Option<String> {
    path.map(|path| format!("{}{}", base, path))
}

/// A movie returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub release_year: Option<i32>,
    pub rating: f64,
    pub genre: String,
}

/// Full details for a movie's own page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    /// Minutes
    pub runtime: Option<u32>,
    pub rating: f64,
    pub vote_count: u64,
    pub genres: Vec<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub production_companies: Vec<String>,
    pub cast: Vec<CastMember>,
    pub directors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
    pub profile_url: Option<String>,
}

/// Where a movie can be watched, by provider name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WatchProviders {
    pub streaming: Vec<String>,
    pub rent: Vec<String>,
    pub buy: Vec<String>,
    /// Free with ads
    pub free: Vec<String>,
    /// TMDB page listing every provider for the movie
    pub link: Option<String>,
}

impl WatchProviders {
    pub fn is_empty(&self) -> bool {
        self.streaming.is_empty()
            && self.rent.is_empty()
            && self.buy.is_empty()
            && self.free.is_empty()
    }
}

/// A mood recommendation: the movie plus its watch providers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(flatten)]
    pub movie: Movie,
    pub providers: WatchProviders,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw movie entry from TMDB's discover endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl From<TmdbMovie> for Movie {
    fn from(movie: TmdbMovie) -> Self {
        // TMDB sends "" for unknown dates
        let release_year = movie
            .release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok());

        let genre = movie
            .genre_ids
            .first()
            .and_then(|id| genre_name(*id))
            .unwrap_or("Drama")
            .to_string();

        Movie {
            id: movie.id,
            title: movie.title,
            overview: movie.overview.filter(|o| !o.is_empty()),
            poster_url: image_url(POSTER_BASE_URL, movie.poster_path),
            release_year,
            rating: movie.vote_average,
            genre,
        }
    }
}

/// Paged list response from TMDB
#[derive(Debug, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

/// Response from GET /movie/{id}/watch/providers
#[derive(Debug, Deserialize)]
pub struct TmdbWatchProvidersResponse {
    #[serde(default)]
    pub results: std::collections::HashMap<String, TmdbRegionProviders>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TmdbRegionProviders {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<TmdbProvider>,
    #[serde(default)]
    pub rent: Vec<TmdbProvider>,
    #[serde(default)]
    pub buy: Vec<TmdbProvider>,
    #[serde(default)]
    pub free: Vec<TmdbProvider>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbProvider {
    pub provider_name: String,
}

impl From<TmdbRegionProviders> for WatchProviders {
    fn from(region: TmdbRegionProviders) -> Self {
        let names = |list: Vec<TmdbProvider>| -> Vec<String> {
            list.into_iter().map(|p| p.provider_name).collect()
        };
        WatchProviders {
            streaming: names(region.flatrate),
            rent: names(region.rent),
            buy: names(region.buy),
            free: names(region.free),
            link: region.link.filter(|link| !link.is_empty()),
        }
    }
}

/// Response from GET /movie/{id}
#[derive(Debug, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub genres: Vec<TmdbNamed>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub production_companies: Vec<TmdbNamed>,
}

/// Any TMDB object of which only the name is read (genres, companies)
#[derive(Debug, Deserialize)]
pub struct TmdbNamed {
    pub name: String,
}

/// Response from GET /movie/{id}/credits
#[derive(Debug, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

impl TmdbMovieDetails {
    /// Combines the details with the movie's credits, keeping the top-billed cast
    pub fn with_credits(self, credits: TmdbCredits) -> MovieDetails {
        let names = |list: Vec<TmdbNamed>| -> Vec<String> {
            list.into_iter().map(|named| named.name).collect()
        };

        MovieDetails {
            id: self.id,
            title: self.title,
            overview: self.overview.filter(|o| !o.is_empty()),
            release_date: self.release_date.filter(|d| !d.is_empty()),
            runtime: self.runtime.filter(|minutes| *minutes > 0),
            rating: self.vote_average,
            vote_count: self.vote_count,
            genres: names(self.genres),
            poster_url: image_url(POSTER_BASE_URL, self.poster_path),
            backdrop_url: image_url(BACKDROP_BASE_URL, self.backdrop_path),
            production_companies: names(self.production_companies),
            cast: credits
                .cast
                .into_iter()
                .take(MAX_CAST)
                .map(|member| CastMember {
                    name: member.name,
                    character: member.character.filter(|c| !c.is_empty()),
                    profile_url: image_url(PROFILE_BASE_URL, member.profile_path),
                })
                .collect(),
            directors: credits
                .crew
                .into_iter()
                .filter(|member| member.job == "Director")
                .map(|member| member.name)
                .collect(),
        }
    }
}
