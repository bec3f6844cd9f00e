#[cfg(test)]
mod tests {
    use super::super::*;
    use approx::assert_relative_eq;

    fn assert_targets(profile: &MoodProfile, expected: (f32, f32, f32, f32)) {
        assert_relative_eq!(profile.targets.energy(), expected.0);
        assert_relative_eq!(profile.targets.danceability(), expected.1);
        assert_relative_eq!(profile.targets.valence(), expected.2);
        assert_relative_eq!(profile.targets.acousticness(), expected.3);
    }

    #[test]
    fn test_happy_profile() {
        let profile = MoodAnalyzer::analyze_mood("I feel happy today");

        assert_eq!(profile.mood, Mood::Happy);
        assert_targets(&profile, (0.8, 0.7, 0.8, 0.3));
        assert_eq!(profile.suggested_genres, vec!["pop", "dance", "electronic", "funk"]);
        assert_eq!(profile.search_query_terms, "happy upbeat energetic");
    }

    #[test]
    fn test_every_happy_keyword_alone_yields_happy() {
        // "energetic" is also an energetic keyword, so it is not included here
        for keyword in ["happy", "joyful", "excited", "upbeat", "great", "fantastic"] {
            let profile = MoodAnalyzer::analyze_mood(keyword);
            assert_eq!(profile.mood, Mood::Happy, "keyword {keyword}");
            assert_targets(&profile, (0.8, 0.7, 0.8, 0.3));
        }
    }

    #[test]
    fn test_each_category_profile() {
        let cases = [
            ("feeling lonely tonight", Mood::Sad, (0.3, 0.2, 0.2, 0.7), "sad emotional soulful"),
            ("so peaceful here", Mood::Relaxed, (0.2, 0.3, 0.5, 0.8), "relaxing chill ambient"),
            ("pumped for the gym", Mood::Energetic, (0.9, 0.8, 0.7, 0.1), "energetic powerful intense"),
            ("I'm in love", Mood::Romantic, (0.4, 0.5, 0.7, 0.6), "romantic love passionate"),
            ("studying for finals", Mood::Focused, (0.5, 0.3, 0.5, 0.5), "focus study concentration"),
        ];

        for (text, mood, targets, terms) in cases {
            let profile = MoodAnalyzer::analyze_mood(text);
            assert_eq!(profile.mood, mood, "text {text:?}");
            assert_targets(&profile, targets);
            assert_eq!(profile.search_query_terms, terms);
            assert_eq!(profile.suggested_genres.len(), 4);
        }
    }

    #[test]
    fn test_romantic_genres_keep_multiword_tags() {
        let profile = MoodAnalyzer::analyze_mood("passionate");
        assert_eq!(profile.suggested_genres, vec!["soul", "r&b", "indie", "acoustic pop"]);
    }

    #[test]
    fn test_no_keywords_yields_neutral() {
        let profile = MoodAnalyzer::analyze_mood("banana bread recipe");

        assert_eq!(profile.mood, Mood::Neutral);
        assert_targets(&profile, (0.5, 0.5, 0.5, 0.5));
        assert!(profile.suggested_genres.is_empty());
        assert!(profile.search_query_terms.is_empty());
        assert_eq!(profile, MoodProfile::default());
    }

    #[test]
    fn test_empty_description_yields_neutral() {
        assert_eq!(MoodAnalyzer::analyze_mood(""), MoodProfile::default());
    }

    #[test]
    fn test_last_matching_rule_wins() {
        // happy is evaluated first, focused last
        let profile = MoodAnalyzer::analyze_mood("happy but working hard");
        assert_eq!(profile.mood, Mood::Focused);
        assert_targets(&profile, (0.5, 0.3, 0.5, 0.5));

        // sad and relaxed both match, relaxed comes later
        let profile = MoodAnalyzer::analyze_mood("sad but calm");
        assert_eq!(profile.mood, Mood::Relaxed);
    }

    #[test]
    fn test_happy_and_energetic_resolves_to_energetic() {
        // both rules match "energetic"; the energetic rule is evaluated after happy
        let profile = MoodAnalyzer::analyze_mood("I feel happy and energetic");

        assert_eq!(profile.mood, Mood::Energetic);
        assert_relative_eq!(profile.targets.energy(), 0.9);
        assert_eq!(profile.search_query_terms, "energetic powerful intense");
    }

    #[test]
    fn test_matching_is_substring_based() {
        // "down" inside "downtown"
        let profile = MoodAnalyzer::analyze_mood("walking downtown");
        assert_eq!(profile.mood, Mood::Sad);
    }

    #[test]
    fn test_multiword_keyword() {
        let profile = MoodAnalyzer::analyze_mood("totally FIRED UP right now");
        assert_eq!(profile.mood, Mood::Energetic);
    }

    #[test]
    fn test_classification_ignores_case() {
        let lower = MoodAnalyzer::analyze_mood("i am so joyful");
        let upper = MoodAnalyzer::analyze_mood("I AM SO JOYFUL");
        let mixed = MoodAnalyzer::analyze_mood("I Am So JoyFul");

        assert_eq!(lower, upper);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let text = "melancholy and heartbroken but productive";
        let first = MoodAnalyzer::analyze_mood(text);
        for _ in 0..10 {
            assert_eq!(MoodAnalyzer::analyze_mood(text), first);
        }
    }

    #[test]
    fn test_rule_presets_are_valid_targets() {
        for rule in &MOOD_RULES {
            let t = rule.targets;
            for value in [t.energy(), t.danceability(), t.valence(), t.acousticness()] {
                assert!((0.0..=1.0).contains(&value), "rule {}", rule.mood);
            }
            assert!(!rule.keywords.is_empty());
            assert!(!rule.search_terms.is_empty());
        }
    }
}
