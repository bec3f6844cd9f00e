use tracing::{info, warn};

use super::format::{
    format_track, no_songs_message, playlist_created_note, playlist_description, playlist_name,
    response_header, search_failed_message,
};
use crate::client::CatalogApi;
use crate::error::CatalogError;
use crate::models::Track;
use crate::mood::{Mood, MoodAnalyzer};

/// Tracks requested by the initial search
pub const SEARCH_LIMIT: u32 = 5;
/// Upper bound on track and genre seeds combined
pub const MAX_SEEDS: usize = 5;
/// Tracks requested from recommendations and from the fallback search
pub const EXTRA_TRACKS_LIMIT: u32 = 15;

/// Seeds for a recommendation request
#[derive(Debug, Default, PartialEq)]
pub struct Seeds {
    pub tracks: Vec<String>,
    pub genres: Vec<String>,
}

impl Seeds {
    /// Take up to `MAX_SEEDS` track IDs, then fill the remainder with genres in order
    pub fn select(tracks: &[Track], genres: &[String]) -> Self {
        let track_ids: Vec<String> = tracks
            .iter()
            .filter_map(Track::seed_id)
            .take(MAX_SEEDS)
            .map(str::to_string)
            .collect();

        let remaining = MAX_SEEDS - track_ids.len();
        Seeds {
            genres: genres.iter().take(remaining).cloned().collect(),
            tracks: track_ids,
        }
    }
}

/// Turns a mood description into a list of recommendations, optionally
/// saved as a playlist on the user's account
pub struct MoodAnalyst<C> {
    client: C,
    create_playlists: bool,
}

impl<C: CatalogApi> MoodAnalyst<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            create_playlists: true,
        }
    }

    /// Toggle the playlist step
    pub fn with_playlists(mut self, enabled: bool) -> Self {
        self.create_playlists = enabled;
        self
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// Analyze the mood and build a human-readable response. Never fails;
    /// catalog errors degrade to an apology.
    pub fn recommend(&self, description: &str) -> String {
        let profile = MoodAnalyzer::analyze_mood(description);
        info!("Detected mood: {profile}");

        let query = if profile.search_query_terms.is_empty() {
            description.to_string()
        } else {
            profile.search_query_terms.clone()
        };

        let mut tracks = match self.client.search_tracks(&query, SEARCH_LIMIT) {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("Error searching tracks: {e}");
                return search_failed_message(profile.mood);
            }
        };

        if tracks.is_empty() {
            return no_songs_message(profile.mood);
        }

        let seeds = Seeds::select(&tracks, &profile.suggested_genres);
        info!(
            "Fetching {} additional recommendations using {} seed tracks and {} genres",
            EXTRA_TRACKS_LIMIT,
            seeds.tracks.len(),
            seeds.genres.len()
        );

        match self.client.get_recommendations(
            &seeds.tracks,
            &seeds.genres,
            &profile.targets,
            EXTRA_TRACKS_LIMIT,
        ) {
            Ok(recommended) => {
                info!(
                    "Got {} recommendations, appending to {} existing tracks",
                    recommended.len(),
                    tracks.len()
                );
                tracks.extend(recommended);
            }
            Err(e) => {
                warn!("Failed to get recommendations: {e}");
                tracks.extend(self.fallback_search(&query, profile.mood));
            }
        }

        let mut response = response_header(profile.mood);
        let mut track_uris = Vec::new();

        info!("Building response with {} total tracks", tracks.len());
        for (i, track) in tracks.iter().enumerate() {
            response.push_str(&format!("{}. {}\n", i + 1, format_track(track)));
            if let Some(uri) = track.playlist_uri() {
                track_uris.push(uri.to_string());
            }
        }

        if self.create_playlists {
            match self.save_playlist(profile.mood, &track_uris) {
                Ok(url) => response.push_str(&playlist_created_note(&url)),
                Err(e) => warn!("Skipping playlist creation: {e}"),
            }
        }

        response
    }

    /// Broader search used when recommendations are unavailable. Failures
    /// yield no tracks.
    fn fallback_search(&self, query: &str, mood: Mood) -> Vec<Track> {
        let fallback_query = format!("{query} {mood}");
        info!("Trying fallback search: {fallback_query}");

        match self.client.search_tracks(&fallback_query, EXTRA_TRACKS_LIMIT) {
            Ok(tracks) => {
                info!("Fallback found {} additional tracks", tracks.len());
                tracks
            }
            Err(e) => {
                warn!("Fallback search also failed: {e}");
                Vec::new()
            }
        }
    }

    /// Create a playlist for the mood and fill it; returns its web link
    fn save_playlist(&self, mood: Mood, track_uris: &[String]) -> Result<String, CatalogError> {
        let user = self.client.get_current_user()?;
        info!(
            "Creating playlist for {}",
            user.display_name.as_deref().unwrap_or(&user.id)
        );
        let playlist =
            self.client
                .create_playlist(&user.id, &playlist_name(mood), &playlist_description(mood))?;

        info!(
            "Created playlist '{}' ({}), adding {} tracks",
            playlist.name,
            playlist.id,
            track_uris.len()
        );
        self.client.add_tracks_to_playlist(&playlist.id, track_uris)?;

        Ok(playlist.external_url().to_string())
    }
}
