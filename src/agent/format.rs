use crate::models::Track;
use crate::mood::Mood;

/// Helper trait for string formatting
pub trait ToTitleCase {
    fn to_title_case(&self) -> String;
}

impl ToTitleCase for str {
    fn to_title_case(&self) -> String {
        self.split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Render a single recommendation line
pub fn format_track_recommendation(track_name: &str, artist_name: &str, url: &str) -> String {
    format!("🎵 {track_name} by {artist_name}\n   🔗 {url}")
}

pub fn format_track(track: &Track) -> String {
    format_track_recommendation(&track.name, track.primary_artist(), track.external_url())
}

pub fn response_header(mood: Mood) -> String {
    format!("Based on your mood ({mood}), here are some song recommendations:\n\n")
}

pub fn search_failed_message(mood: Mood) -> String {
    format!(
        "I detected your mood as '{mood}', but I couldn't fetch recommendations right now. Try again later!"
    )
}

pub fn no_songs_message(mood: Mood) -> String {
    format!("I understand you're feeling {mood}, but I couldn't find any matching songs right now.")
}

pub fn playlist_name(mood: Mood) -> String {
    format!("Mood Analyst: {} Vibes", mood.to_string().to_title_case())
}

pub fn playlist_description(mood: Mood) -> String {
    format!("A playlist curated for your {mood} mood.")
}

pub fn playlist_created_note(url: &str) -> String {
    format!("\n✨ I've also created a playlist for you: {url}\n")
}
