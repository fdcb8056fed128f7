//! N-gram language detection against small weighted reference profiles.
//!
//! Similarity is weighted recall against the reference profile:
//! `Σ weight(k) * count(k)` over keys present in both, divided by the total
//! weight of the profile. Keys found only in the text do not count, so the
//! measure is deliberately asymmetric.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::round_to;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

/// Reported when no profile matched anything.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// A reference profile: n-gram or word to weight.
pub type LanguageProfile = HashMap<String, f64>;

const ENGLISH: &[(&str, f64)] = &[
    ("the", 10.0),
    ("and", 8.0),
    ("ing", 7.0),
    ("ion", 6.0),
    ("tio", 5.0),
    ("ent", 5.0),
    ("for", 5.0),
    ("her", 4.0),
    ("tha", 4.0),
    ("that", 4.0),
    ("is", 4.0),
    ("of", 6.0),
    ("to", 6.0),
    ("in", 5.0),
    ("it", 3.0),
    ("you", 3.0),
    ("was", 3.0),
    ("with", 3.0),
];

const SPANISH: &[(&str, f64)] = &[
    ("que", 8.0),
    ("de", 8.0),
    ("la", 7.0),
    ("el", 7.0),
    ("en", 6.0),
    ("los", 5.0),
    ("las", 5.0),
    ("con", 5.0),
    ("por", 5.0),
    ("una", 4.0),
    ("para", 4.0),
    ("es", 4.0),
    ("ción", 5.0),
    ("ado", 4.0),
    ("del", 5.0),
    ("está", 3.0),
];

const FRENCH: &[(&str, f64)] = &[
    ("le", 7.0),
    ("la", 6.0),
    ("les", 7.0),
    ("de", 8.0),
    ("des", 6.0),
    ("et", 7.0),
    ("est", 5.0),
    ("une", 5.0),
    ("que", 5.0),
    ("pour", 4.0),
    ("dans", 4.0),
    ("ent", 4.0),
    ("qui", 4.0),
    ("pas", 3.0),
    ("sur", 3.0),
    ("ais", 3.0),
];

const GERMAN: &[(&str, f64)] = &[
    ("der", 8.0),
    ("die", 8.0),
    ("und", 8.0),
    ("das", 6.0),
    ("ist", 5.0),
    ("ein", 6.0),
    ("sch", 6.0),
    ("ich", 6.0),
    ("nicht", 5.0),
    ("den", 5.0),
    ("mit", 4.0),
    ("auf", 4.0),
    ("cht", 5.0),
    ("ung", 5.0),
    ("zu", 4.0),
    ("von", 4.0),
];

static DEFAULT_PROFILES: Lazy<IndexMap<String, LanguageProfile>> = Lazy::new(|| {
    [
        ("english", ENGLISH),
        ("spanish", SPANISH),
        ("french", FRENCH),
        ("german", GERMAN),
    ]
    .into_iter()
    .map(|(name, grams)| {
        let profile = grams.iter().map(|(k, w)| (k.to_string(), *w)).collect();
        (name.to_string(), profile)
    })
    .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDetectionResult {
    pub detected_language: String,
    /// Share of the winning score in the sum of all scores, 0..1.
    pub confidence: f64,
    /// Per-language similarity, rounded to two decimals, in profile order.
    pub scores: IndexMap<String, f64>,
}

#[derive(Debug, Clone)]
pub struct LanguageDetector {
    profiles: IndexMap<String, LanguageProfile>,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector {
    /// Creates a detector with the english, spanish, french and german profiles.
    pub fn new() -> Self {
        Self {
            profiles: DEFAULT_PROFILES.clone(),
        }
    }

    /// Adds a profile, replacing any existing one with the same (case-insensitive) name.
    pub fn add_custom_language<I, K>(&mut self, name: &str, profile: I)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let profile = profile
            .into_iter()
            .map(|(k, w)| (k.as_ref().to_lowercase(), w))
            .collect();
        self.profiles.insert(name.to_lowercase(), profile);
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Counts words of length ≥ 2 and every character trigram of words of length ≥ 3.
    pub fn build_profile(text: &str) -> HashMap<String, usize> {
        let lowered = text.to_lowercase();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for word in WORD_PATTERN.find_iter(&lowered).map(|m| m.as_str()) {
            let chars: Vec<char> = word.chars().collect();
            if chars.len() >= 2 {
                *counts.entry(word.to_string()).or_default() += 1;
            }
            if chars.len() >= 3 {
                for window in chars.windows(3) {
                    *counts.entry(window.iter().collect()).or_default() += 1;
                }
            }
        }

        counts
    }

    /// Weighted recall of `profile` in `text_profile`.
    pub fn calculate_similarity(
        text_profile: &HashMap<String, usize>,
        profile: &LanguageProfile,
    ) -> f64 {
        let total_weight: f64 = profile.values().sum();
        if total_weight <= 0.0 {
            return 0.0;
        }
        let matched: f64 = profile
            .iter()
            .filter_map(|(key, weight)| text_profile.get(key).map(|c| weight * *c as f64))
            .sum();
        matched / total_weight
    }

    pub fn detect(&self, text: &str) -> LanguageDetectionResult {
        let text_profile = Self::build_profile(text);

        let mut best: Option<(&str, f64)> = None;
        let mut total = 0.0;
        let mut scores = IndexMap::with_capacity(self.profiles.len());

        for (language, profile) in &self.profiles {
            let score = Self::calculate_similarity(&text_profile, profile);
            total += score;
            // strict comparison: the first language reaching the max wins ties
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((language.as_str(), score));
            }
            scores.insert(language.clone(), round_to(score, 2));
        }

        match best {
            Some((language, score)) if score > 0.0 => LanguageDetectionResult {
                detected_language: language.to_string(),
                confidence: round_to(score / total, 2),
                scores,
            },
            _ => LanguageDetectionResult {
                detected_language: UNKNOWN_LANGUAGE.to_string(),
                confidence: 0.0,
                scores,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_english_function_words() {
        let detector = LanguageDetector::new();
        let result = detector.detect("the and for");
        assert_eq!(result.detected_language, "english");

        let english = result.scores["english"];
        for (language, score) in &result.scores {
            if language != "english" {
                assert!(english > *score, "{language} scored {score}");
            }
        }
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_detects_german_and_spanish() {
        let detector = LanguageDetector::new();
        assert_eq!(
            detector
                .detect("Der Hund und die Katze sind nicht hier, das ist schön")
                .detected_language,
            "german"
        );
        assert_eq!(
            detector
                .detect("El perro y los gatos están en la casa para comer con el niño")
                .detected_language,
            "spanish"
        );
    }

    #[test]
    fn test_build_profile_counts_words_and_trigrams() {
        let profile = LanguageDetector::build_profile("The theme");
        assert_eq!(profile.get("the"), Some(&3));
        assert_eq!(profile.get("theme"), Some(&1));
        assert_eq!(profile.get("hem"), Some(&1));
        assert_eq!(profile.get("t"), None);
    }

    #[test]
    fn test_similarity_ignores_text_only_keys() {
        let mut text = HashMap::new();
        text.insert("zzz".to_string(), 50);
        text.insert("abc".to_string(), 1);
        let profile: LanguageProfile = [("abc".to_string(), 2.0), ("xyz".to_string(), 2.0)]
            .into_iter()
            .collect();
        assert_eq!(LanguageDetector::calculate_similarity(&text, &profile), 0.5);
    }

    #[test]
    fn test_no_match_is_unknown() {
        let detector = LanguageDetector::new();
        let result = detector.detect("xyzzy qwv");
        assert_eq!(result.detected_language, UNKNOWN_LANGUAGE);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.scores.len(), 4);
    }

    #[test]
    fn test_custom_language_overwrites_case_insensitively() {
        let mut detector = LanguageDetector::new();
        detector.add_custom_language("Klingon", [("qapla", 5.0)]);
        assert_eq!(detector.detect("Qapla qapla").detected_language, "klingon");

        detector.add_custom_language("KLINGON", [("tlhingan", 5.0)]);
        assert_eq!(detector.languages().count(), 5);
        assert_eq!(detector.detect("Qapla").detected_language, UNKNOWN_LANGUAGE);

        let fresh = LanguageDetector::new();
        assert_eq!(fresh.languages().count(), 4);
    }
}
