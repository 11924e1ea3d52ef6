use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::models::{Mood, MoodResult, MoodScores, QuestionBank, QuestionKind};

/// What the user picked for a single question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// A 1..5 rating for a scale question
    Rating(u8),
    /// The mood labels of the chosen option of a choice question
    Moods(Vec<String>),
}

/// Answers keyed by question index
///
/// Ordered so the scorer always folds answers in the same sequence.
pub type Answers = BTreeMap<usize, Selection>;

/// Scores a set of quiz answers against the bank they were collected from
///
/// Scale answers add `weight * rating / 5` to each of the question's moods; choice
/// answers add the full weight to each chosen mood. Answers pointing outside the bank,
/// ratings outside 1..5, kind mismatches and unknown mood labels are skipped.
///
/// The winner is the strictly highest score, with ties going to the mood declared
/// first. Confidence is the winner's share of the total, or 0 when nothing scored.
pub fn score(answers: &Answers, bank: &QuestionBank) -> MoodResult {
    let mut scores = MoodScores::new();

    for (&index, selection) in answers {
        let Some(question) = bank.get(index) else {
            tracing::debug!(index, "Skipping answer for unknown question");
            continue;
        };

        match (&question.kind, selection) {
            (QuestionKind::Scale { moods, .. }, Selection::Rating(value))
                if (1..=5).contains(value) =>
            {
                let amount = question.weight * f64::from(*value) / 5.0;
                for mood in moods.iter().collect::<HashSet<_>>() {
                    scores.add(*mood, amount);
                }
            }
            (QuestionKind::Choice { .. }, Selection::Moods(labels)) => {
                let moods: HashSet<Mood> =
                    Mood::parse_lenient(labels.as_slice()).into_iter().collect();
                for mood in moods {
                    scores.add(mood, question.weight);
                }
            }
            _ => {
                tracing::debug!(
                    index,
                    question_id = question.id,
                    ?selection,
                    "Skipping malformed answer"
                );
            }
        }
    }

    let (mood, top) = scores.leader();
    let total = scores.total();
    let confidence = if total > 0.0 {
        (100.0 * top / total).round().clamp(0.0, 100.0) as u8
    } else {
        0
    };

    MoodResult {
        mood,
        confidence,
        scores: Some(scores),
    }
}

/// Result for the one-question quiz, where the user names their mood directly
pub fn score_one_shot(mood: Mood) -> MoodResult {
    MoodResult {
        mood,
        confidence: 100,
        scores: None,
    }
}
