use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Mood;

/// One point on a 1..5 rating scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleStep {
    pub value: u8,
    pub label: String,
}

/// A discrete answer to a choice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub key: String,
    pub label: String,
    /// Raw labels; entries outside the mood set are ignored when scoring
    #[serde(default)]
    pub moods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    Scale {
        scale: Vec<ScaleStep>,
        #[serde(default)]
        moods: Vec<Mood>,
    },
    Choice { options: Vec<ChoiceOption> },
}

/// A single quiz question with its scoring weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub weight: f64,
}

impl Question {
    /// Finds a choice option by key; always `None` for scale questions
    pub fn option(&self, key: &str) -> Option<&ChoiceOption> {
        match &self.kind {
            QuestionKind::Choice { options } => options.iter().find(|o| o.key == key),
            QuestionKind::Scale { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BankError {
    #[error("Question bank is empty")]
    Empty,

    #[error("Question {id} has invalid weight {weight}")]
    InvalidWeight { id: u32, weight: f64 },

    #[error("Question {id} must have a 1..5 rating scale")]
    InvalidScale { id: u32 },

    #[error("Question {id} has no options")]
    NoOptions { id: u32 },

    #[error("Question {id} repeats option key '{key}'")]
    DuplicateOption { id: u32, key: String },
}

/// Ordered, validated set of quiz questions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }

        for question in &questions {
            if !question.weight.is_finite() || question.weight < 0.0 {
                return Err(BankError::InvalidWeight {
                    id: question.id,
                    weight: question.weight,
                });
            }

            match &question.kind {
                QuestionKind::Scale { scale, .. } => {
                    let values: Vec<u8> = scale.iter().map(|step| step.value).collect();
                    if values != [1, 2, 3, 4, 5] {
                        return Err(BankError::InvalidScale { id: question.id });
                    }
                }
                QuestionKind::Choice { options } => {
                    if options.is_empty() {
                        return Err(BankError::NoOptions { id: question.id });
                    }
                    let mut seen = HashSet::new();
                    for option in options {
                        if !seen.insert(option.key.as_str()) {
                            return Err(BankError::DuplicateOption {
                                id: question.id,
                                key: option.key.clone(),
                            });
                        }
                    }
                }
            }
        }

        Ok(Self { questions })
    }

    /// Parses and validates a bank from its JSON form (an array of questions)
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Ok(Self::new(questions)?)
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self {
            questions: default_questions(),
        }
    }
}

fn scale(labels: [&str; 5]) -> Vec<ScaleStep> {
    labels
        .iter()
        .zip(1u8..)
        .map(|(label, value)| ScaleStep {
            value,
            label: label.to_string(),
        })
        .collect()
}

fn choice(key: &str, label: &str, moods: &[&str]) -> ChoiceOption {
    ChoiceOption {
        key: key.to_string(),
        label: label.to_string(),
        moods: moods.iter().map(|m| m.to_string()).collect(),
    }
}

/// Built-in eight-question mood survey
fn default_questions() -> Vec<Question> {
    vec![
        Question {
            id: 1,
            prompt: "How energetic do you feel right now?".to_string(),
            kind: QuestionKind::Scale {
                scale: scale([
                    "Very tired/drained",
                    "Somewhat low energy",
                    "Neutral",
                    "Somewhat energetic",
                    "Very energetic/excited",
                ]),
                moods: vec![Mood::Excited, Mood::Adventurous],
            },
            weight: 0.15,
        },
        Question {
            id: 2,
            prompt: "How would you describe your overall mood?".to_string(),
            kind: QuestionKind::Scale {
                scale: scale([
                    "Very negative/down",
                    "Somewhat negative",
                    "Neutral",
                    "Somewhat positive",
                    "Very positive/happy",
                ]),
                moods: vec![Mood::Happy],
            },
            weight: 0.25,
        },
        Question {
            id: 3,
            prompt: "How stressed or anxious do you feel?".to_string(),
            kind: QuestionKind::Scale {
                scale: scale([
                    "Very stressed/anxious",
                    "Somewhat stressed",
                    "Neutral",
                    "Somewhat calm",
                    "Very calm/relaxed",
                ]),
                moods: vec![Mood::Calm],
            },
            weight: 0.20,
        },
        Question {
            id: 4,
            prompt: "What type of experience are you seeking?".to_string(),
            kind: QuestionKind::Choice {
                options: vec![
                    choice(
                        "escape",
                        "Escape from reality",
                        &["happy", "excited", "adventurous"],
                    ),
                    choice(
                        "reflect",
                        "Reflect and think deeply",
                        &["calm", "contemplative"],
                    ),
                    choice(
                        "thrill",
                        "Get thrilled or excited",
                        &["excited", "adventurous"],
                    ),
                    choice("comfort", "Feel comforted", &["calm", "nostalgic"]),
                ],
            },
            weight: 0.15,
        },
        Question {
            id: 5,
            prompt: "How focused do you feel mentally?".to_string(),
            kind: QuestionKind::Scale {
                scale: scale([
                    "Very scattered/unfocused",
                    "Somewhat unfocused",
                    "Neutral",
                    "Somewhat focused",
                    "Very focused/sharp",
                ]),
                moods: vec![Mood::Contemplative],
            },
            weight: 0.10,
        },
        Question {
            id: 6,
            prompt: "How social do you feel?".to_string(),
            kind: QuestionKind::Choice {
                options: vec![
                    choice("alone", "Want to be alone", &["calm", "contemplative"]),
                    choice(
                        "intimate",
                        "Want intimate connection",
                        &["romantic", "nostalgic"],
                    ),
                    choice("group", "Want group experiences", &["happy", "excited"]),
                    choice("neutral", "No preference", &["neutral"]),
                ],
            },
            weight: 0.10,
        },
        Question {
            id: 7,
            prompt: "How much emotional intensity do you want?".to_string(),
            kind: QuestionKind::Scale {
                scale: scale([
                    "Very light/simple",
                    "Somewhat light",
                    "Moderate",
                    "Somewhat intense",
                    "Very intense/dramatic",
                ]),
                moods: vec![Mood::Excited, Mood::Scared],
            },
            weight: 0.15,
        },
        Question {
            id: 8,
            prompt: "What describes your current emotional state best?".to_string(),
            kind: QuestionKind::Choice {
                options: vec![
                    choice("joyful", "Joyful and optimistic", &["happy"]),
                    choice("melancholy", "Sad or melancholy", &["sad"]),
                    choice("angry", "Frustrated or angry", &["angry"]),
                    choice("fearful", "Scared or anxious", &["scared"]),
                    choice("excited", "Thrilled and energetic", &["excited"]),
                    choice("peaceful", "Calm and peaceful", &["calm"]),
                ],
            },
            weight: 0.20,
        },
    ]
}
