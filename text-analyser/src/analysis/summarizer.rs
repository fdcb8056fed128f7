//! Extractive summarisation by word-frequency sentence scoring.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::round_to;

static SENTENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("valid regex"));
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "else", "when", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "once", "here", "there", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "can", "will", "just", "should", "now", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "i", "me",
    "my", "we", "our", "you", "your", "he", "him", "his", "she", "her", "it", "its", "they",
    "them", "their", "what", "which", "who", "whom", "this", "that", "these", "those", "of",
    "as", "until", "while", "because",
];

/// Default number of sentences kept by [`TextSummarizer::summarize`].
pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub summary: String,
    pub original_sentence_count: usize,
    pub summary_sentence_count: usize,
    /// Summary length over original length, in characters.
    pub compression_ratio: f64,
}

#[derive(Debug, Clone)]
pub struct TextSummarizer {
    stop_words: HashSet<String>,
}

impl Default for TextSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSummarizer {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Adds words that should not contribute to sentence scores.
    pub fn add_stop_words<I>(&mut self, words: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Splits text into sentences that end in terminal punctuation.
    pub fn split_sentences(text: &str) -> Vec<&str> {
        SENTENCE_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Picks the `sentence_count` highest-scoring sentences and returns them
    /// in their original order, joined with single spaces.
    ///
    /// Text that already has no more than `sentence_count` sentences is
    /// returned unchanged.
    pub fn extractive_summarize(&self, text: &str, sentence_count: usize) -> String {
        let sentences = Self::split_sentences(text);
        if sentences.len() <= sentence_count {
            return text.to_string();
        }

        let tokenized: Vec<Vec<String>> = sentences
            .iter()
            .map(|s| {
                WORD_PATTERN
                    .find_iter(s)
                    .map(|m| m.as_str().to_lowercase())
                    .collect()
            })
            .collect();

        let mut frequency: HashMap<&str, usize> = HashMap::new();
        for word in tokenized.iter().flatten() {
            if !self.is_stop_word(word) {
                *frequency.entry(word.as_str()).or_default() += 1;
            }
        }

        let mut scored: Vec<(usize, f64)> = tokenized
            .iter()
            .enumerate()
            .map(|(idx, words)| {
                let total: usize = words
                    .iter()
                    .filter(|w| !self.is_stop_word(w))
                    .map(|w| frequency.get(w.as_str()).copied().unwrap_or(0))
                    .sum();
                (idx, total as f64 / words.len().max(1) as f64)
            })
            .collect();

        // stable sort: equal scores keep their original order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let mut selected: Vec<usize> = scored
            .into_iter()
            .take(sentence_count)
            .map(|(idx, _)| idx)
            .collect();
        selected.sort_unstable();

        debug!(
            original = sentences.len(),
            kept = selected.len(),
            "Selected summary sentences"
        );

        selected
            .into_iter()
            .map(|idx| sentences[idx].trim())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Summarises and reports how much the text shrank.
    pub fn summarize(&self, text: &str, sentence_count: usize) -> SummaryResult {
        let summary = self.extractive_summarize(text, sentence_count);
        let original_sentence_count = Self::split_sentences(text).len();
        let summary_sentence_count = Self::split_sentences(&summary).len();
        let original_len = text.chars().count();
        let compression_ratio = if original_len == 0 {
            1.0
        } else {
            round_to(summary.chars().count() as f64 / original_len as f64, 2)
        };

        SummaryResult {
            summary,
            original_sentence_count,
            summary_sentence_count,
            compression_ratio,
        }
    }
}
