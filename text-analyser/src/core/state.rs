//! Mutable state owned by one analyser and threaded through every handler.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::{
    LanguageDetectionResult, ReadabilityResult, SentimentResult, SummaryResult, TextDiffResult,
};

/// Counters set by the counting operations. All start at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    pub character_count: usize,
    pub alphabet_count: usize,
    pub numeric_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
}

/// Matches collected by the extraction operations, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extractions {
    pub urls: Vec<String>,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
}

/// Structured output attached to side metadata under an operation id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SideMetadata {
    Sentiment(SentimentResult),
    Summary(SummaryResult),
    Readability(ReadabilityResult),
    LanguageDetection(LanguageDetectionResult),
    TextComparison(TextDiffResult),
    /// Whatever a custom operation's metadata and extractor produced.
    Custom(Value),
}

/// Which partition of the log an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEntryKind {
    BuiltIn,
    Custom,
    Error,
}

/// One line of the operation audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub label: String,
    pub kind: LogEntryKind,
}

/// Append-only audit trail of executed operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationLog {
    entries: Vec<LogEntry>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_builtin(&mut self, label: impl Into<String>) {
        self.push(label, LogEntryKind::BuiltIn);
    }

    pub fn push_custom(&mut self, label: impl Into<String>) {
        self.push(label, LogEntryKind::Custom);
    }

    /// Error entries only show up in the combined view.
    pub fn push_error(&mut self, label: impl Into<String>) {
        self.push(label, LogEntryKind::Error);
    }

    fn push(&mut self, label: impl Into<String>, kind: LogEntryKind) {
        self.entries.push(LogEntry {
            label: label.into(),
            kind,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Every label, in the order it was written.
    pub fn all(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.label.clone()).collect()
    }

    pub fn built_in(&self) -> Vec<String> {
        self.labels_of(LogEntryKind::BuiltIn)
    }

    pub fn custom(&self) -> Vec<String> {
        self.labels_of(LogEntryKind::Custom)
    }

    fn labels_of(&self, kind: LogEntryKind) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.label.clone())
            .collect()
    }

    /// Comma-joined combined view.
    pub fn purpose(&self) -> String {
        self.all().join(", ")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The working state handlers read and mutate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextState {
    pub text: String,
    pub counts: Counts,
    pub extractions: Extractions,
    pub side_metadata: IndexMap<String, SideMetadata>,
    pub log: OperationLog,
}

impl TextState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Clears counts, extractions, side metadata and the log; optionally swaps the text.
    pub fn reset(&mut self, new_text: Option<String>) {
        self.counts = Counts::default();
        self.extractions = Extractions::default();
        self.side_metadata.clear();
        self.log.clear();
        if let Some(text) = new_text {
            self.text = text;
        }
    }
}
