use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Mood, MoodResult, Question, QuestionBank},
    routes::AppState,
    services::{
        classifier::{self, Answers, Selection},
        genres::{genre_name, genres_for},
    },
};

/// An answer as sent by the client
///
/// `option` is resolved against the question's choice options. A key that matches
/// no option is passed through as a mood label, which is how the quick quiz sends
/// its single pick. Anything else lands in `Malformed` so one unreadable answer
/// never rejects the rest of the request.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswerInput {
    Rating { value: i64 },
    Moods { moods: Vec<String> },
    Choice { option: String },
    Malformed(serde_json::Value),
}

impl AnswerInput {
    pub fn resolve(self, question: Option<&Question>) -> Selection {
        match self {
            // Out-of-range ratings become 0, which the classifier skips
            AnswerInput::Rating { value } => Selection::Rating(u8::try_from(value).unwrap_or(0)),
            AnswerInput::Moods { moods } => Selection::Moods(moods),
            AnswerInput::Choice { option } => match question.and_then(|q| q.option(&option)) {
                Some(choice) => Selection::Moods(choice.moods.clone()),
                None => Selection::Moods(vec![option]),
            },
            // No labels: scores nothing and mismatches scale questions
            AnswerInput::Malformed(value) => {
                tracing::debug!(%value, "Unreadable answer");
                Selection::Moods(Vec::new())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub answers: BTreeMap<String, AnswerInput>,
}

#[derive(Debug, Deserialize)]
pub struct QuickRequest {
    pub mood: String,
}

#[derive(Debug, Serialize)]
pub struct GenresResponse {
    pub mood: Mood,
    pub genre_ids: Vec<u32>,
    pub genres: Vec<&'static str>,
}

/// Resolves client answers against the bank into classifier input
///
/// Keys that are not question indices are dropped.
pub fn resolve_answers(inputs: BTreeMap<String, AnswerInput>, bank: &QuestionBank) -> Answers {
    inputs
        .into_iter()
        .filter_map(|(key, input)| match key.parse::<usize>() {
            Ok(index) => Some((index, input.resolve(bank.get(index)))),
            Err(_) => {
                tracing::debug!(key = %key, "Skipping answer with non-numeric index");
                None
            }
        })
        .collect()
}

/// Handler returning the quiz question bank
pub async fn questions(State(state): State<Arc<AppState>>) -> Json<QuestionBank> {
    Json(state.question_bank.clone())
}

/// Handler scoring a complete set of answers in one call
pub async fn score(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ScoreRequest>,
) -> Json<MoodResult> {
    let answer_count = request.answers.len();
    let answers = resolve_answers(request.answers, &state.question_bank);
    let result = classifier::score(&answers, &state.question_bank);

    tracing::info!(
        request_id = %request_id,
        answer_count,
        mood = %result.mood,
        confidence = result.confidence,
        "Scored mood quiz"
    );

    Json(result)
}

/// Handler for the one-question quiz
pub async fn quick(Json(request): Json<QuickRequest>) -> AppResult<Json<MoodResult>> {
    let mood: Mood = request
        .mood
        .parse()
        .map_err(|e: crate::models::UnknownMood| AppError::InvalidInput(e.to_string()))?;

    Ok(Json(classifier::score_one_shot(mood)))
}

/// Handler listing the genres recommended for a mood
pub async fn genres(Path(mood): Path<String>) -> AppResult<Json<GenresResponse>> {
    let mood: Mood = mood
        .parse()
        .map_err(|e: crate::models::UnknownMood| AppError::NotFound(e.to_string()))?;
    let genre_ids = genres_for(mood).to_vec();
    let genres = genre_ids.iter().filter_map(|id| genre_name(*id)).collect();

    Ok(Json(GenresResponse {
        mood,
        genre_ids,
        genres,
    }))
}
