use super::{AudioFeatureTargets, Mood, MoodProfile};

/// A keyword set and the profile it produces when any keyword matches
pub struct MoodRule {
    pub mood: Mood,
    pub keywords: &'static [&'static str],
    pub targets: AudioFeatureTargets,
    pub genres: &'static [&'static str],
    pub search_terms: &'static str,
}

impl MoodRule {
    fn matches(&self, description: &str) -> bool {
        self.keywords.iter().any(|keyword| description.contains(keyword))
    }

    fn to_profile(&self) -> MoodProfile {
        MoodProfile {
            mood: self.mood,
            targets: self.targets,
            suggested_genres: self.genres.iter().map(|g| g.to_string()).collect(),
            search_query_terms: self.search_terms.to_string(),
        }
    }
}

/// Rules in evaluation order. A later match replaces an earlier one.
pub const MOOD_RULES: [MoodRule; 6] = [
    MoodRule {
        mood: Mood::Happy,
        keywords: &["happy", "joyful", "excited", "energetic", "upbeat", "great", "fantastic"],
        targets: AudioFeatureTargets::new(0.8, 0.7, 0.8, 0.3),
        genres: &["pop", "dance", "electronic", "funk"],
        search_terms: "happy upbeat energetic",
    },
    MoodRule {
        mood: Mood::Sad,
        keywords: &["sad", "down", "depressed", "lonely", "blue", "heartbroken", "melancholy"],
        targets: AudioFeatureTargets::new(0.3, 0.2, 0.2, 0.7),
        genres: &["indie", "folk", "soul", "acoustic"],
        search_terms: "sad emotional soulful",
    },
    MoodRule {
        mood: Mood::Relaxed,
        keywords: &["calm", "relaxed", "chill", "peaceful", "serene", "tranquil", "zen"],
        targets: AudioFeatureTargets::new(0.2, 0.3, 0.5, 0.8),
        genres: &["ambient", "lo-fi", "jazz", "acoustic"],
        search_terms: "relaxing chill ambient",
    },
    MoodRule {
        mood: Mood::Energetic,
        keywords: &["pumped", "energetic", "motivated", "fired up", "adrenaline"],
        targets: AudioFeatureTargets::new(0.9, 0.8, 0.7, 0.1),
        genres: &["hip-hop", "electronic", "rock", "metal"],
        search_terms: "energetic powerful intense",
    },
    MoodRule {
        mood: Mood::Romantic,
        keywords: &["romantic", "in love", "loved", "affectionate", "passionate"],
        targets: AudioFeatureTargets::new(0.4, 0.5, 0.7, 0.6),
        genres: &["soul", "r&b", "indie", "acoustic pop"],
        search_terms: "romantic love passionate",
    },
    MoodRule {
        mood: Mood::Focused,
        keywords: &["focused", "studying", "concentrating", "working", "productive"],
        targets: AudioFeatureTargets::new(0.5, 0.3, 0.5, 0.5),
        genres: &["lo-fi", "classical", "ambient", "instrumental"],
        search_terms: "focus study concentration",
    },
];

/// Keyword-driven mood classification
pub struct MoodAnalyzer;

impl MoodAnalyzer {
    /// Classify a free-text mood description.
    ///
    /// Matching is case-insensitive substring containment. Rules are applied
    /// in `MOOD_RULES` order and a match overwrites whatever an earlier rule
    /// set, so the last matching rule decides. Text that matches nothing yields the
    /// neutral profile.
    pub fn analyze_mood(description: &str) -> MoodProfile {
        let description = description.to_lowercase();

        MOOD_RULES
            .iter()
            .rev()
            .find(|rule| rule.matches(&description))
            .map(MoodRule::to_profile)
            .unwrap_or_default()
    }
}
