use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Mood, MoodResult, QuestionBank};
use crate::services::classifier::{self, Answers, Selection};

/// Which quiz a session walks through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Every question in the bank, scored by the weighted classifier
    #[default]
    Full,
    /// A single direct mood pick
    Quick,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizState {
    InProgress { current: usize, answers: Answers },
    Complete { result: MoodResult },
}

impl QuizState {
    fn initial() -> Self {
        QuizState::InProgress {
            current: 0,
            answers: Answers::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuizError {
    #[error("Quiz is already complete")]
    AlreadyComplete,

    #[error("Quick quiz expects a known mood label")]
    InvalidQuickSelection,
}

/// One user's pass through the mood quiz
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub id: Uuid,
    pub mode: QuizMode,
    pub created_at: DateTime<Utc>,
    state: QuizState,
}

impl QuizSession {
    pub fn new(mode: QuizMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            created_at: Utc::now(),
            state: QuizState::initial(),
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn result(&self) -> Option<&MoodResult> {
        match &self.state {
            QuizState::Complete { result } => Some(result),
            QuizState::InProgress { .. } => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, QuizState::Complete { .. })
    }

    /// Number of questions in this session's quiz
    pub fn total(&self, bank: &QuestionBank) -> usize {
        match self.mode {
            QuizMode::Full => bank.len(),
            QuizMode::Quick => 1,
        }
    }

    /// `(answered, total)` for progress display
    pub fn progress(&self, bank: &QuestionBank) -> (usize, usize) {
        let total = self.total(bank);
        match &self.state {
            QuizState::InProgress { current, .. } => (*current, total),
            QuizState::Complete { .. } => (total, total),
        }
    }

    /// Records the answer to the current question
    ///
    /// On the last question the quiz is scored and the session completes; otherwise
    /// it moves on to the next question. Full-mode answers are recorded as given and
    /// left to the classifier to weigh or ignore.
    pub fn answer(
        &mut self,
        bank: &QuestionBank,
        selection: Selection,
    ) -> Result<&QuizState, QuizError> {
        let QuizState::InProgress { current, answers } = &mut self.state else {
            return Err(QuizError::AlreadyComplete);
        };

        match self.mode {
            QuizMode::Quick => {
                let mood = match &selection {
                    Selection::Moods(labels) => labels.first().and_then(|l| l.parse::<Mood>().ok()),
                    Selection::Rating(_) => None,
                }
                .ok_or(QuizError::InvalidQuickSelection)?;

                self.state = QuizState::Complete {
                    result: classifier::score_one_shot(mood),
                };
            }
            QuizMode::Full => {
                answers.insert(*current, selection);

                if *current + 1 >= bank.len() {
                    let result = classifier::score(answers, bank);
                    tracing::info!(
                        session_id = %self.id,
                        mood = %result.mood,
                        confidence = result.confidence,
                        "Quiz complete"
                    );
                    self.state = QuizState::Complete { result };
                } else {
                    *current += 1;
                }
            }
        }

        Ok(&self.state)
    }

    /// Starts the quiz over from the first question
    pub fn reset(&mut self) {
        self.state = QuizState::initial();
    }

    /// Whether the session has outlived `ttl` as of `now`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.created_at) > ttl
    }
}
