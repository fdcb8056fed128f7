//! Standalone analyzers used by the analysis operations.
//!
//! Each analyzer can also be used on its own. Reference data (lexicons,
//! stop words, language profiles) is copied into every instance, so
//! extending one analyzer never affects another.

pub mod diff;
pub mod language;
pub mod readability;
pub mod sentiment;
pub mod summarizer;

pub use diff::{CommonSubstring, TextDiff, TextDiffResult, WordDifference};
pub use language::{LanguageDetectionResult, LanguageDetector, LanguageProfile};
pub use readability::{count_syllables, flesch_kincaid_readability, Complexity, ReadabilityResult};
pub use sentiment::{SentimentAnalyzer, SentimentClassification, SentimentResult};
pub use summarizer::{SummaryResult, TextSummarizer, DEFAULT_SUMMARY_SENTENCES};

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(57.142857, 2), 57.14);
        assert_eq!(round_to(116.14, 1), 116.1);
        assert_eq!(round_to(-1.449, 1), -1.4);
    }
}
