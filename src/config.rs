use serde::Deserialize;

use crate::models::QuestionBank;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Movies returned per mood recommendation
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Minimum TMDB vote average for recommended movies
    #[serde(default = "default_min_vote_average")]
    pub min_vote_average: f64,

    /// Seconds a quiz session is kept before it is discarded
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// JSON question bank replacing the built-in survey
    #[serde(default)]
    pub question_bank_path: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_recommendation_limit() -> usize {
    12
}

fn default_min_vote_average() -> f64 {
    6.0
}

fn default_session_ttl_secs() -> u64 {
    3600
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Session time-to-live as a chrono duration
    pub fn session_ttl(&self) -> anyhow::Result<chrono::Duration> {
        i64::try_from(self.session_ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| {
                anyhow::anyhow!("SESSION_TTL_SECS out of range: {}", self.session_ttl_secs)
            })
    }

    /// Loads the configured question bank, or the built-in one when no path is set
    pub fn load_question_bank(&self) -> anyhow::Result<QuestionBank> {
        match &self.question_bank_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    anyhow::anyhow!("Failed to read question bank {}: {}", path, e)
                })?;
                let bank = QuestionBank::from_json(&json)?;
                tracing::info!(path = %path, questions = bank.len(), "Loaded question bank");
                Ok(bank)
            }
            None => Ok(QuestionBank::default()),
        }
    }
}
