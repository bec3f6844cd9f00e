use std::fmt;

use strum::{Display, EnumIter, EnumString};

/// Mood labels the classifier can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Relaxed,
    Energetic,
    Romantic,
    Focused,
    Neutral,
}

/// Audio-feature targets steering recommendation selection (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioFeatureTargets {
    energy: f32,
    danceability: f32,
    valence: f32,
    acousticness: f32,
}

impl AudioFeatureTargets {
    /// Build a set of targets. Every value must lie in [0, 1]; in a const
    /// context an out-of-range value is a compile error.
    pub const fn new(energy: f32, danceability: f32, valence: f32, acousticness: f32) -> Self {
        assert!(energy >= 0.0 && energy <= 1.0, "energy target out of range");
        assert!(
            danceability >= 0.0 && danceability <= 1.0,
            "danceability target out of range"
        );
        assert!(valence >= 0.0 && valence <= 1.0, "valence target out of range");
        assert!(
            acousticness >= 0.0 && acousticness <= 1.0,
            "acousticness target out of range"
        );

        Self {
            energy,
            danceability,
            valence,
            acousticness,
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn danceability(&self) -> f32 {
        self.danceability
    }

    pub fn valence(&self) -> f32 {
        self.valence
    }

    pub fn acousticness(&self) -> f32 {
        self.acousticness
    }

    /// Query parameters for the recommendations endpoint
    pub fn query_params(&self) -> [(&'static str, String); 4] {
        [
            ("target_energy", self.energy().to_string()),
            ("target_danceability", self.danceability().to_string()),
            ("target_valence", self.valence().to_string()),
            ("target_acousticness", self.acousticness().to_string()),
        ]
    }
}

impl Default for AudioFeatureTargets {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.5)
    }
}

/// Result of classifying a mood description
#[derive(Debug, Clone, PartialEq)]
pub struct MoodProfile {
    pub mood: Mood,
    pub targets: AudioFeatureTargets,
    pub suggested_genres: Vec<String>,
    pub search_query_terms: String,
}

impl Default for MoodProfile {
    fn default() -> Self {
        Self {
            mood: Mood::Neutral,
            targets: AudioFeatureTargets::default(),
            suggested_genres: Vec::new(),
            search_query_terms: String::new(),
        }
    }
}

impl fmt::Display for MoodProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (energy {}, danceability {}, valence {}, acousticness {})",
            self.mood,
            self.targets.energy(),
            self.targets.danceability(),
            self.targets.valence(),
            self.targets.acousticness()
        )
    }
}
