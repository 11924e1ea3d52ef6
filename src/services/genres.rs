use crate::models::Mood;

/// TMDB genre ids recommended for a mood
///
/// Nostalgic has no curated list and shares the happy genres.
pub fn genres_for(mood: Mood) -> &'static [u32] {
    match mood {
        Mood::Happy | Mood::Nostalgic => &[35, 16, 10751], // Comedy, Animation, Family
        Mood::Sad => &[18, 10749],                         // Drama, Romance
        Mood::Excited => &[28, 12, 878],                   // Action, Adventure, Sci-Fi
        Mood::Calm => &[99, 36, 10402],                    // Documentary, History, Music
        Mood::Angry => &[28, 80, 53],                      // Action, Crime, Thriller
        Mood::Romantic => &[10749, 35],                    // Romance, Comedy
        Mood::Adventurous => &[12, 28, 14],                // Adventure, Action, Fantasy
        Mood::Scared => &[27, 53],                         // Horror, Thriller
        Mood::Contemplative => &[18, 99, 9648],            // Drama, Documentary, Mystery
    }
}

/// Display name of a TMDB movie genre id
pub fn genre_name(id: u32) -> Option<&'static str> {
    let name = match id {
        28 => "Action",
        12 => "Adventure",
        16 => "Animation",
        35 => "Comedy",
        80 => "Crime",
        99 => "Documentary",
        18 => "Drama",
        10751 => "Family",
        14 => "Fantasy",
        36 => "History",
        27 => "Horror",
        10402 => "Music",
        9648 => "Mystery",
        10749 => "Romance",
        878 => "Science Fiction",
        10770 => "TV Movie",
        53 => "Thriller",
        10752 => "War",
        37 => "Western",
        _ => return None,
    };
    Some(name)
}
