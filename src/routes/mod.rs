use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

pub mod mood;
pub mod movies;
pub mod quiz;
pub mod recommendations;
mod state;

pub use state::AppState;

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quiz/questions", get(mood::questions))
        .route("/mood/score", post(mood::score))
        .route("/mood/quick", post(mood::quick))
        .route("/moods/:mood/genres", get(mood::genres))
        .route("/quiz/sessions", post(quiz::create_session))
        .route(
            "/quiz/sessions/:id",
            get(quiz::get_session).delete(quiz::delete_session),
        )
        .route("/quiz/sessions/:id/answers", post(quiz::answer))
        .route("/quiz/sessions/:id/reset", post(quiz::reset))
        .route("/recommendations", get(recommendations::recommend))
        .route("/movies/:id", get(movies::details))
        .route("/movies/:id/providers", get(movies::providers))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
