use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{MoodResult, QuestionBank},
    routes::{mood::AnswerInput, AppState},
    services::quiz::{QuizMode, QuizSession, QuizState},
};

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub mode: QuizMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Complete,
}

/// Client view of a quiz session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub mode: QuizMode,
    pub status: SessionStatus,
    /// Index of the next question to answer, absent once complete
    pub current_question: Option<usize>,
    pub answered: usize,
    pub total: usize,
    pub result: Option<MoodResult>,
    pub created_at: DateTime<Utc>,
}

impl SessionResponse {
    fn new(session: &QuizSession, bank: &QuestionBank) -> Self {
        let (answered, total) = session.progress(bank);
        let (status, current_question) = match session.state() {
            QuizState::InProgress { current, .. } => (SessionStatus::InProgress, Some(*current)),
            QuizState::Complete { .. } => (SessionStatus::Complete, None),
        };

        Self {
            id: session.id,
            mode: session.mode,
            status,
            current_question,
            answered,
            total,
            result: session.result().cloned(),
            created_at: session.created_at,
        }
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Quiz session {}", id))
}

/// Looks up a session, discarding it instead if it has expired
fn live_session(
    sessions: &mut HashMap<Uuid, QuizSession>,
    id: Uuid,
    ttl: Duration,
) -> AppResult<&mut QuizSession> {
    if sessions
        .get(&id)
        .is_some_and(|session| session.is_expired(Utc::now(), ttl))
    {
        sessions.remove(&id);
        tracing::debug!(session_id = %id, "Quiz session expired");
    }
    sessions.get_mut(&id).ok_or_else(|| session_not_found(id))
}

/// Handler starting a new quiz session
///
/// The body is optional; a request without one starts a full quiz.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    request: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    let request = match request {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => CreateSessionRequest::default(),
        Err(rejection) => return Err(AppError::InvalidInput(rejection.body_text())),
    };

    state.purge_expired_sessions().await;

    let session = QuizSession::new(request.mode);
    let response = SessionResponse::new(&session, &state.question_bank);

    tracing::info!(session_id = %session.id, mode = ?session.mode, "Quiz session started");

    state.sessions.write().await.insert(session.id, session);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler returning a session's progress
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let mut sessions = state.sessions.write().await;
    let session = live_session(&mut sessions, id, state.session_ttl)?;
    Ok(Json(SessionResponse::new(session, &state.question_bank)))
}

/// Handler recording the answer to a session's current question
pub async fn answer(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
    Json(input): Json<AnswerInput>,
) -> AppResult<Json<SessionResponse>> {
    let bank = &state.question_bank;
    let mut sessions = state.sessions.write().await;
    let session = live_session(&mut sessions, id, state.session_ttl)?;

    let question = match (session.mode, session.state()) {
        (QuizMode::Full, QuizState::InProgress { current, .. }) => bank.get(*current),
        _ => None,
    };
    let selection = input.resolve(question);

    session.answer(bank, selection)?;

    tracing::info!(
        request_id = %request_id,
        session_id = %id,
        complete = session.is_complete(),
        "Quiz answer recorded"
    );

    Ok(Json(SessionResponse::new(session, bank)))
}

/// Handler restarting a session from the first question
pub async fn reset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let mut sessions = state.sessions.write().await;
    let session = live_session(&mut sessions, id, state.session_ttl)?;
    session.reset();
    Ok(Json(SessionResponse::new(session, &state.question_bank)))
}

/// Handler discarding a session
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let mut sessions = state.sessions.write().await;
    live_session(&mut sessions, id, state.session_ttl)?;
    sessions.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}
