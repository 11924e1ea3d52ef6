mod mood;
mod movie;
mod question;

pub use mood::{Mood, MoodResult, MoodScores, UnknownMood};
pub use movie::{
    CastMember, Movie, MovieDetails, Recommendation, TmdbCredits, TmdbMovie, TmdbMovieDetails,
    TmdbPage, TmdbRegionProviders, TmdbWatchProvidersResponse, WatchProviders,
};
pub use question::{BankError, ChoiceOption, Question, QuestionBank, QuestionKind, ScaleStep};
