//! The detached report returned by a successful run.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::operation::BuiltinOperation;
use super::state::{Counts, SideMetadata, TextState};
use crate::analysis::{
    LanguageDetectionResult, ReadabilityResult, SentimentResult, SummaryResult, TextDiffResult,
};
use crate::error::Result;

/// Counters, extractions and per-operation side metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    pub counts: Counts,
    pub urls: Vec<String>,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    /// Side metadata keyed by operation id, in the order it was produced.
    pub custom: IndexMap<String, SideMetadata>,
}

/// Timing of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTimestamps {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl RunTimestamps {
    pub fn record_start(&mut self) {
        self.start_time = Some(Utc::now());
        self.end_time = None;
    }

    pub fn record_end(&mut self) {
        self.end_time = Some(Utc::now());
    }

    /// Elapsed time if both ends were recorded.
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Elapsed milliseconds with microsecond precision, or 0.
    pub fn elapsed_ms(&self) -> f64 {
        self.duration()
            .and_then(|d| d.num_microseconds())
            .map_or(0.0, |us| us as f64 / 1000.0)
    }
}

/// Snapshot of an analyser after a completed run.
///
/// Owns copies of everything it reports, so later mutation of the analyser
/// never shows up here. The analysis shortcuts (`sentiment`, `summary`, ...)
/// are only present when the matching operation ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Every log label, comma-joined.
    pub purpose: String,
    /// The final text.
    pub output: String,
    pub operations: Vec<String>,
    pub built_in_operations: Vec<String>,
    pub custom_operations: Vec<String>,
    pub metadata: ResultMetadata,
    /// Wall-clock run time in milliseconds.
    pub execution_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readability: Option<ReadabilityResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_detection: Option<LanguageDetectionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_comparison: Option<TextDiffResult>,
}

impl AnalysisResult {
    pub(crate) fn from_state(state: &TextState, execution_time: f64) -> Self {
        let side = |op: BuiltinOperation| state.side_metadata.get(op.id());

        Self {
            purpose: state.log.purpose(),
            output: state.text.clone(),
            operations: state.log.all(),
            built_in_operations: state.log.built_in(),
            custom_operations: state.log.custom(),
            metadata: ResultMetadata {
                counts: state.counts,
                urls: state.extractions.urls.clone(),
                emails: state.extractions.emails.clone(),
                phone_numbers: state.extractions.phone_numbers.clone(),
                hashtags: state.extractions.hashtags.clone(),
                mentions: state.extractions.mentions.clone(),
                custom: state.side_metadata.clone(),
            },
            execution_time,
            sentiment: match side(BuiltinOperation::AnalyzeSentiment) {
                Some(SideMetadata::Sentiment(r)) => Some(r.clone()),
                _ => None,
            },
            summary: match side(BuiltinOperation::Summarize) {
                Some(SideMetadata::Summary(r)) => Some(r.clone()),
                _ => None,
            },
            readability: match side(BuiltinOperation::Readability) {
                Some(SideMetadata::Readability(r)) => Some(r.clone()),
                _ => None,
            },
            language_detection: match side(BuiltinOperation::DetectLanguage) {
                Some(SideMetadata::LanguageDetection(r)) => Some(r.clone()),
                _ => None,
            },
            text_comparison: match side(BuiltinOperation::CompareTexts) {
                Some(SideMetadata::TextComparison(r)) => Some(r.clone()),
                _ => None,
            },
        }
    }

    /// Side metadata recorded under `id`.
    pub fn side_metadata(&self, id: &str) -> Option<&SideMetadata> {
        self.metadata.custom.get(id)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
