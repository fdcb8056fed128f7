//! Rendering of [`AnalysisResult`]s as JSON, console text or Markdown.
//!
//! # Examples
//!
//! ```rust
//! use text_analyser::formatters::{HumanFormatter, ResultFormatter, FormatterConfig};
//! use text_analyser::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> text_analyser::Result<()> {
//! let mut analyser = Analyser::new("Hello #rust", OperationConfig::new().enable("extract-hashtags"));
//! let result = analyser.run().await?;
//!
//! let formatter = HumanFormatter::with_config(FormatterConfig::default().with_colors(false));
//! let report = formatter.format(&result)?;
//! assert!(report.contains("#rust"));
//! # Ok(())
//! # }
//! ```

use std::fmt::{self, Write};

use crate::core::{AnalysisResult, SideMetadata};
use crate::error::{AnalyserError, Result};

/// What goes into a rendered report.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include the operation trail
    pub include_operations: bool,
    /// Include counters
    pub include_counts: bool,
    /// Include extracted URLs, emails, phone numbers, hashtags and mentions
    pub include_extractions: bool,
    /// Include side metadata (sentiment, readability, custom operations...)
    pub include_analysis: bool,
    /// Maximum entries shown per list (-1 for all)
    pub max_items: i32,
    /// Whether to use ANSI colors (human formatter only)
    pub use_colors: bool,
    /// Whether to include the execution time
    pub include_timing: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_operations: true,
            include_counts: true,
            include_extractions: true,
            include_analysis: true,
            max_items: -1,
            use_colors: true,
            include_timing: true,
        }
    }
}

impl FormatterConfig {
    /// Output text and trail only.
    pub fn minimal() -> Self {
        Self {
            include_operations: true,
            include_counts: false,
            include_extractions: false,
            include_analysis: false,
            max_items: 0,
            use_colors: false,
            include_timing: false,
        }
    }

    pub fn detailed() -> Self {
        Self::default()
    }

    /// No colors, bounded lists.
    pub fn ci() -> Self {
        Self {
            include_operations: true,
            include_counts: true,
            include_extractions: true,
            include_analysis: true,
            max_items: 20,
            use_colors: false,
            include_timing: true,
        }
    }

    pub fn with_counts(mut self, include: bool) -> Self {
        self.include_counts = include;
        self
    }

    pub fn with_analysis(mut self, include: bool) -> Self {
        self.include_analysis = include;
        self
    }

    pub fn with_max_items(mut self, max: i32) -> Self {
        self.max_items = max;
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn limit<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if self.max_items < 0 {
            items
        } else {
            &items[..items.len().min(self.max_items as usize)]
        }
    }
}

/// Turns an analysis result into a string.
///
/// ```rust
/// use text_analyser::core::AnalysisResult;
/// use text_analyser::formatters::ResultFormatter;
///
/// struct OutputOnly;
///
/// impl ResultFormatter for OutputOnly {
///     fn format(&self, result: &AnalysisResult) -> text_analyser::Result<String> {
///         Ok(result.output.clone())
///     }
/// }
/// ```
pub trait ResultFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String>;

    /// Formats with an explicit config. The default ignores the config.
    fn format_with_config(
        &self,
        result: &AnalysisResult,
        _config: &FormatterConfig,
    ) -> Result<String> {
        self.format(result)
    }
}

/// Serialises the (filtered) result with camelCase keys.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(
        &self,
        result: &AnalysisResult,
        config: &FormatterConfig,
    ) -> Result<String> {
        let filtered = filter_result_for_config(result, config);
        let json = if self.pretty {
            serde_json::to_string_pretty(&filtered)?
        } else {
            serde_json::to_string(&filtered)?
        };
        Ok(json)
    }
}

/// Console-friendly report.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn render(
        &self,
        out: &mut String,
        result: &AnalysisResult,
        config: &FormatterConfig,
    ) -> fmt::Result {
        let paint = |code: &str, text: &str| {
            if config.use_colors {
                format!("\x1b[{code}m{text}\x1b[0m")
            } else {
                text.to_string()
            }
        };

        writeln!(out)?;
        writeln!(out, "📝 {}", paint("32", "Analysis COMPLETE"))?;
        writeln!(out)?;
        writeln!(out, "Output: {}", result.output)?;
        if config.include_timing {
            writeln!(out, "Execution Time: {:.3}ms", result.execution_time)?;
        }

        if config.include_operations && !result.operations.is_empty() {
            writeln!(out)?;
            writeln!(out, "🔧 Operations:")?;
            for (i, label) in result.operations.iter().enumerate() {
                let label = if label.starts_with("Error") {
                    paint("31", label.as_str())
                } else {
                    label.clone()
                };
                writeln!(out, "   {}. {label}", i + 1)?;
            }
        }

        if config.include_counts {
            let counts = &result.metadata.counts;
            writeln!(out)?;
            writeln!(out, "📊 Counts:")?;
            writeln!(out, "   Characters: {}", counts.character_count)?;
            writeln!(out, "   Alphabets: {}", counts.alphabet_count)?;
            writeln!(out, "   Numbers: {}", counts.numeric_count)?;
            writeln!(out, "   Words: {}", counts.word_count)?;
            writeln!(out, "   Sentences: {}", counts.sentence_count)?;
        }

        if config.include_extractions {
            for (title, items) in extraction_lists(result) {
                if items.is_empty() {
                    continue;
                }
                writeln!(out)?;
                writeln!(out, "🔗 {title}:")?;
                let shown = config.limit(items);
                for item in shown {
                    writeln!(out, "   - {item}")?;
                }
                if items.len() > shown.len() {
                    writeln!(out, "   ... and {} more", items.len() - shown.len())?;
                }
            }
        }

        if config.include_analysis && !result.metadata.custom.is_empty() {
            writeln!(out)?;
            writeln!(out, "🔍 Analysis:")?;
            for (id, value) in &result.metadata.custom {
                writeln!(out, "   {id}: {}", describe(value))?;
            }
        }

        writeln!(out)
    }
}

impl ResultFormatter for HumanFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(
        &self,
        result: &AnalysisResult,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        self.render(&mut output, result, config)
            .map_err(|e| AnalyserError::Serialization(e.to_string()))?;
        Ok(output)
    }
}

/// Markdown report for documentation or PR comments.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Base heading level, clamped to 1..=5 so subsections stay within `######`.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 5);
        self
    }

    fn render(
        &self,
        out: &mut String,
        result: &AnalysisResult,
        config: &FormatterConfig,
    ) -> fmt::Result {
        let h = "#".repeat(self.heading_level as usize);

        writeln!(out, "{h} 📝 Analysis Report")?;
        writeln!(out)?;
        writeln!(out, "**Output:** `{}`", result.output.replace('`', "\\`"))?;
        if config.include_timing {
            writeln!(out, "**Execution Time:** {:.3}ms", result.execution_time)?;
        }

        if config.include_operations && !result.operations.is_empty() {
            writeln!(out)?;
            writeln!(out, "{h}# Operations")?;
            writeln!(out)?;
            for label in &result.operations {
                writeln!(out, "1. {label}")?;
            }
        }

        if config.include_counts {
            let counts = &result.metadata.counts;
            writeln!(out)?;
            writeln!(out, "{h}# Counts")?;
            writeln!(out)?;
            writeln!(out, "| Metric | Value |")?;
            writeln!(out, "|--------|-------|")?;
            writeln!(out, "| Characters | {} |", counts.character_count)?;
            writeln!(out, "| Alphabets | {} |", counts.alphabet_count)?;
            writeln!(out, "| Numbers | {} |", counts.numeric_count)?;
            writeln!(out, "| Words | {} |", counts.word_count)?;
            writeln!(out, "| Sentences | {} |", counts.sentence_count)?;
        }

        if config.include_extractions {
            for (title, items) in extraction_lists(result) {
                if items.is_empty() {
                    continue;
                }
                writeln!(out)?;
                writeln!(out, "{h}# {title}")?;
                writeln!(out)?;
                let shown = config.limit(items);
                for item in shown {
                    writeln!(out, "- {item}")?;
                }
                if items.len() > shown.len() {
                    writeln!(
                        out,
                        "> **Note:** {} additional entries not shown.",
                        items.len() - shown.len()
                    )?;
                }
            }
        }

        if config.include_analysis && !result.metadata.custom.is_empty() {
            writeln!(out)?;
            writeln!(out, "{h}# Analysis")?;
            writeln!(out)?;
            writeln!(out, "| Operation | Result |")?;
            writeln!(out, "|-----------|--------|")?;
            for (id, value) in &result.metadata.custom {
                writeln!(out, "| {id} | {} |", describe(value).replace('|', "\\|"))?;
            }
        }

        Ok(())
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for MarkdownFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(
        &self,
        result: &AnalysisResult,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        self.render(&mut output, result, config)
            .map_err(|e| AnalyserError::Serialization(e.to_string()))?;
        Ok(output)
    }
}

fn extraction_lists(result: &AnalysisResult) -> [(&'static str, &[String]); 5] {
    let m = &result.metadata;
    [
        ("URLs", m.urls.as_slice()),
        ("Emails", m.emails.as_slice()),
        ("Phone Numbers", m.phone_numbers.as_slice()),
        ("Hashtags", m.hashtags.as_slice()),
        ("Mentions", m.mentions.as_slice()),
    ]
}

/// One-line summary of a side metadata entry.
fn describe(value: &SideMetadata) -> String {
    match value {
        SideMetadata::Sentiment(s) => {
            format!("{} (score {:.2})", s.classification, s.score)
        }
        SideMetadata::Summary(s) => format!(
            "{} of {} sentences kept (ratio {:.2})",
            s.summary_sentence_count, s.original_sentence_count, s.compression_ratio
        ),
        SideMetadata::Readability(r) => format!(
            "{} (score {:.1}, grade {:.1})",
            r.complexity, r.readability_score, r.grade_level
        ),
        SideMetadata::LanguageDetection(l) => {
            format!("{} (confidence {:.2})", l.detected_language, l.confidence)
        }
        SideMetadata::TextComparison(d) => {
            let mut line = format!(
                "{:.2}% similar, edit distance {}",
                d.similarity, d.edit_distance
            );
            if let Some(longest) = d.common_substrings.first() {
                line.push_str(&format!(
                    ", longest shared \"{}\" ({} chars)",
                    longest.substring, longest.length
                ));
            }
            line
        }
        SideMetadata::Custom(v) => v.to_string(),
    }
}

fn filter_result_for_config(result: &AnalysisResult, config: &FormatterConfig) -> AnalysisResult {
    let mut filtered = result.clone();
    let m = &mut filtered.metadata;

    if !config.include_operations {
        filtered.operations.clear();
        filtered.built_in_operations.clear();
        filtered.custom_operations.clear();
    }
    if !config.include_counts {
        m.counts = Default::default();
    }
    if config.include_extractions {
        for list in [
            &mut m.urls,
            &mut m.emails,
            &mut m.phone_numbers,
            &mut m.hashtags,
            &mut m.mentions,
        ] {
            let keep = config.limit(list).len();
            list.truncate(keep);
        }
    } else {
        m.urls.clear();
        m.emails.clear();
        m.phone_numbers.clear();
        m.hashtags.clear();
        m.mentions.clear();
    }
    if !config.include_analysis {
        m.custom.clear();
        filtered.sentiment = None;
        filtered.summary = None;
        filtered.readability = None;
        filtered.language_detection = None;
        filtered.text_comparison = None;
    }
    if !config.include_timing {
        filtered.execution_time = 0.0;
    }

    filtered
}
