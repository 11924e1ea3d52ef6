use std::sync::Arc;
use std::time::Duration;

use mood_match_api::{config::Config, create_router, AppState};
use tracing_subscriber::EnvFilter;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically drops expired quiz sessions so abandoned ones do not pile up
async fn sweep_expired_sessions(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        state.purge_expired_sessions().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mood_match_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;

    tracing::info!(
        questions = state.question_bank.len(),
        provider = state.movie_provider.name(),
        "Application state initialized"
    );

    let state = Arc::new(state);
    tokio::spawn(sweep_expired_sessions(state.clone()));

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
