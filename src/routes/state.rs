use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::Config;
use crate::models::QuestionBank;
use crate::services::{
    providers::{MovieProvider, TmdbProvider},
    quiz::QuizSession,
    recommendations::RecommendationSettings,
};

/// Shared application state
pub struct AppState {
    pub question_bank: QuestionBank,
    pub movie_provider: Arc<dyn MovieProvider>,
    pub recommendation_settings: RecommendationSettings,
    /// In-progress and finished quiz sessions, kept in memory only
    pub sessions: RwLock<HashMap<Uuid, QuizSession>>,
    /// Age after which a session is discarded
    pub session_ttl: Duration,
}

impl AppState {
    pub fn new(
        question_bank: QuestionBank,
        movie_provider: Arc<dyn MovieProvider>,
        recommendation_settings: RecommendationSettings,
    ) -> Self {
        Self {
            question_bank,
            movie_provider,
            recommendation_settings,
            sessions: RwLock::new(HashMap::new()),
            session_ttl: Duration::hours(1),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Drops every session older than the TTL, returning how many were removed
    pub async fn purge_expired_sessions(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, self.session_ttl));
        let removed = before - sessions.len();

        if removed > 0 {
            tracing::debug!(removed, remaining = sessions.len(), "Purged expired quiz sessions");
        }
        removed
    }

    /// Builds state from configuration, backed by the TMDB provider
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let question_bank = config.load_question_bank()?;
        let provider = TmdbProvider::new(config.tmdb_api_key.clone(), config.tmdb_api_url.clone());

        Ok(Self::new(
            question_bank,
            Arc::new(provider),
            RecommendationSettings {
                limit: config.recommendation_limit,
                min_vote_average: config.min_vote_average,
            },
        )
        .with_session_ttl(config.session_ttl()?))
    }
}
