//! Flesch Reading Ease and Flesch-Kincaid Grade Level.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::round_to;

static SENTENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("valid regex"));
static VOWEL_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[aeiouy]+").expect("valid regex"));

/// Reading difficulty band derived from the reading-ease score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    #[serde(rename = "very easy")]
    VeryEasy,
    #[serde(rename = "easy")]
    Easy,
    #[serde(rename = "fairly easy")]
    FairlyEasy,
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "fairly difficult")]
    FairlyDifficult,
    #[serde(rename = "difficult")]
    Difficult,
    #[serde(rename = "very difficult")]
    VeryDifficult,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Complexity {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::VeryEasy
        } else if score >= 80.0 {
            Self::Easy
        } else if score >= 70.0 {
            Self::FairlyEasy
        } else if score >= 60.0 {
            Self::Standard
        } else if score >= 50.0 {
            Self::FairlyDifficult
        } else if score >= 30.0 {
            Self::Difficult
        } else {
            Self::VeryDifficult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryEasy => "very easy",
            Self::Easy => "easy",
            Self::FairlyEasy => "fairly easy",
            Self::Standard => "standard",
            Self::FairlyDifficult => "fairly difficult",
            Self::Difficult => "difficult",
            Self::VeryDifficult => "very difficult",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityResult {
    pub readability_score: f64,
    pub grade_level: f64,
    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
    pub avg_words_per_sentence: f64,
    pub avg_syllables_per_word: f64,
    pub complexity: Complexity,
}

impl ReadabilityResult {
    /// Result reported when there is nothing to measure.
    pub fn unknown() -> Self {
        Self {
            readability_score: 0.0,
            grade_level: 0.0,
            word_count: 0,
            sentence_count: 0,
            syllable_count: 0,
            avg_words_per_sentence: 0.0,
            avg_syllables_per_word: 0.0,
            complexity: Complexity::Unknown,
        }
    }
}

/// Estimates syllables: drop one trailing `e`, count vowel runs, at least one.
pub fn count_syllables(word: &str) -> usize {
    let cleaned: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();
    let stem = cleaned.strip_suffix('e').unwrap_or(cleaned.as_str());
    VOWEL_RUN.find_iter(stem).count().max(1)
}

/// Scores text with the Flesch formulas.
///
/// Text with no words or no terminated sentences yields
/// [`ReadabilityResult::unknown`] instead of dividing by zero.
pub fn flesch_kincaid_readability(text: &str) -> ReadabilityResult {
    let words: Vec<&str> = text.split_whitespace().collect();
    let sentence_count = SENTENCE_PATTERN.find_iter(text).count();

    if words.is_empty() || sentence_count == 0 {
        return ReadabilityResult::unknown();
    }

    let word_count = words.len();
    let syllable_count: usize = words.iter().map(|w| count_syllables(w)).sum();

    let words_per_sentence = word_count as f64 / sentence_count as f64;
    let syllables_per_word = syllable_count as f64 / word_count as f64;

    let readability_score = round_to(
        206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
        1,
    );
    let grade_level = 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59;

    ReadabilityResult {
        readability_score,
        grade_level: round_to(grade_level, 1),
        word_count,
        sentence_count,
        syllable_count,
        avg_words_per_sentence: round_to(words_per_sentence, 1),
        avg_syllables_per_word: round_to(syllables_per_word, 2),
        // labelled from the reported score so the two never disagree
        complexity: Complexity::from_score(readability_score),
    }
}
