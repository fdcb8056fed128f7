//! Lexicon-based sentiment scoring.
//!
//! Each analyzer owns its own copy of the lexicons, so words added through
//! [`SentimentAnalyzer::add_custom_lexicon`] never leak into other instances.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{AnalyserError, Result};

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "awesome", "love",
    "loved", "lovely", "happy", "joy", "joyful", "best", "better", "beautiful", "brilliant",
    "perfect", "nice", "pleasant", "positive", "delight", "delightful", "glad", "superb",
    "outstanding", "enjoy", "enjoyed", "like", "liked", "fun", "success", "successful",
    "win", "winning", "excited", "exciting", "impressive", "favorite", "recommend",
    "helpful", "kind", "calm", "cool", "fine", "thanks", "thank", "grateful", "smile",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "hate", "hated", "sad", "angry", "poor",
    "worst", "worse", "ugly", "boring", "disappointing", "disappointed", "fail", "failed",
    "failure", "problem", "problems", "wrong", "broken", "annoying", "negative", "pain",
    "painful", "fear", "afraid", "upset", "unhappy", "dislike", "lose", "losing", "lost",
    "useless", "slow", "difficult", "hard", "mess", "nasty", "sick", "cry", "hurt",
    "disaster", "dreadful", "inferior", "rude", "stupid", "waste",
];

/// Overall polarity of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentClassification {
    Positive,
    Negative,
    Neutral,
}

impl SentimentClassification {
    /// Maps a score onto a label.
    ///
    /// The bands are asymmetric: anything below -0.05 is negative, while a
    /// positive label needs more than 0.15.
    pub fn from_score(score: f64) -> Self {
        if score > 0.15 {
            Self::Positive
        } else if score < -0.05 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SentimentClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub score: f64,
    pub positive_word_count: usize,
    pub negative_word_count: usize,
    pub total_words: usize,
    pub classification: SentimentClassification,
}

#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    /// Creates an analyzer seeded with the default lexicons.
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().map(|w| w.to_string()).collect(),
            negative: NEGATIVE_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Adds words to the lexicons. Existing words are never removed.
    pub fn add_custom_lexicon<P, N>(&mut self, positive: P, negative: N)
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        self.positive
            .extend(positive.into_iter().map(|w| w.as_ref().to_lowercase()));
        self.negative
            .extend(negative.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    pub fn is_positive(&self, word: &str) -> bool {
        self.positive.contains(word)
    }

    pub fn is_negative(&self, word: &str) -> bool {
        self.negative.contains(word)
    }

    /// Scores `text` as `(positive hits - negative hits) / total words`.
    pub fn analyze(&self, text: &str) -> Result<SentimentResult> {
        if text.trim().is_empty() {
            return Err(AnalyserError::invalid_input(
                "sentiment analysis needs a non-empty text",
            ));
        }

        let mut positive_word_count = 0;
        let mut negative_word_count = 0;
        let mut total_words = 0;

        for token in WORD_PATTERN.find_iter(text) {
            let word = token.as_str().to_lowercase();
            total_words += 1;
            if self.positive.contains(&word) {
                positive_word_count += 1;
            }
            if self.negative.contains(&word) {
                negative_word_count += 1;
            }
        }

        let score = if total_words == 0 {
            0.0
        } else {
            (positive_word_count as f64 - negative_word_count as f64) / total_words as f64
        };

        Ok(SentimentResult {
            score,
            positive_word_count,
            negative_word_count,
            total_words,
            classification: SentimentClassification::from_score(score),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.analyze("I love this great product").unwrap();
        assert_eq!(result.positive_word_count, 2);
        assert_eq!(result.negative_word_count, 0);
        assert_eq!(result.total_words, 5);
        assert!((result.score - 0.4).abs() < f64::EPSILON);
        assert_eq!(result.classification, SentimentClassification::Positive);
    }

    #[test]
    fn test_negative_threshold_is_easier_to_reach() {
        let analyzer = SentimentAnalyzer::new();
        // one negative word in ten: -0.1 is negative, +0.1 would be neutral
        let negative = analyzer
            .analyze("this is a bad idea for the team and plan")
            .unwrap();
        assert!((negative.score + 0.1).abs() < 1e-9);
        assert_eq!(negative.classification, SentimentClassification::Negative);

        let positive = analyzer
            .analyze("this is a good idea for the team and plan")
            .unwrap();
        assert_eq!(positive.classification, SentimentClassification::Neutral);
    }

    #[test]
    fn test_empty_text_fails_fast() {
        let analyzer = SentimentAnalyzer::new();
        assert!(matches!(
            analyzer.analyze("   "),
            Err(AnalyserError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_text_without_words_is_neutral() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.analyze("?!").unwrap();
        assert_eq!(result.total_words, 0);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.classification, SentimentClassification::Neutral);
    }

    #[test]
    fn test_custom_lexicon_is_instance_local() {
        let mut analyzer = SentimentAnalyzer::new();
        analyzer.add_custom_lexicon(["Rad"], Vec::<String>::new());
        assert!(analyzer.is_positive("rad"));
        assert!(analyzer.is_positive("good"));

        let fresh = SentimentAnalyzer::new();
        assert!(!fresh.is_positive("rad"));
    }

    #[test]
    fn test_word_in_both_lexicons_counts_twice() {
        let mut analyzer = SentimentAnalyzer::new();
        analyzer.add_custom_lexicon(Vec::<String>::new(), ["great"]);

        let result = analyzer.analyze("great day").unwrap();
        assert_eq!(result.positive_word_count, 1);
        assert_eq!(result.negative_word_count, 1);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.classification, SentimentClassification::Neutral);
    }

    #[test]
    fn test_classification_bands() {
        assert_eq!(
            SentimentClassification::from_score(0.15),
            SentimentClassification::Neutral
        );
        assert_eq!(
            SentimentClassification::from_score(-0.05),
            SentimentClassification::Neutral
        );
        assert_eq!(
            SentimentClassification::from_score(-0.06),
            SentimentClassification::Negative
        );
    }
}
