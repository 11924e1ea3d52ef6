use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display, str::FromStr};

/// Emotional category used to key the genre table
///
/// Declaration order is significant: it breaks ties when two moods end a quiz
/// with the same score, and `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Excited,
    Calm,
    Angry,
    Scared,
    Romantic,
    Adventurous,
    Contemplative,
    Nostalgic,
}

impl Mood {
    /// Every mood, in declaration order
    pub const ALL: [Mood; 10] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Excited,
        Mood::Calm,
        Mood::Angry,
        Mood::Scared,
        Mood::Romantic,
        Mood::Adventurous,
        Mood::Contemplative,
        Mood::Nostalgic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Calm => "calm",
            Mood::Angry => "angry",
            Mood::Scared => "scared",
            Mood::Romantic => "romantic",
            Mood::Adventurous => "adventurous",
            Mood::Contemplative => "contemplative",
            Mood::Nostalgic => "nostalgic",
        }
    }

    /// Parses a list of raw labels, dropping the ones outside the mood set
    pub fn parse_lenient<S: AsRef<str>>(labels: &[S]) -> Vec<Mood> {
        labels
            .iter()
            .filter_map(|label| label.as_ref().parse().ok())
            .collect()
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mood label: {0}")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == normalized)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

/// Accumulated score per mood
///
/// Always holds an entry for every mood, starting at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodScores(BTreeMap<Mood, f64>);

impl Default for MoodScores {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodScores {
    pub fn new() -> Self {
        Self(Mood::ALL.into_iter().map(|mood| (mood, 0.0)).collect())
    }

    pub fn add(&mut self, mood: Mood, amount: f64) {
        *self.0.entry(mood).or_insert(0.0) += amount;
    }

    pub fn get(&self, mood: Mood) -> f64 {
        self.0.get(&mood).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Mood with the strictly greatest score, first-declared on ties
    pub fn leader(&self) -> (Mood, f64) {
        let mut best = (Mood::ALL[0], self.get(Mood::ALL[0]));
        for mood in Mood::ALL.into_iter().skip(1) {
            let score = self.get(mood);
            if score > best.1 {
                best = (mood, score);
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (Mood, f64)> + '_ {
        self.0.iter().map(|(mood, score)| (*mood, *score))
    }
}

/// Outcome of a quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodResult {
    pub mood: Mood,
    /// Winning share of the total score, as a rounded percentage
    pub confidence: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<MoodScores>,
}
