//! Built-in operation identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalyserError;

/// What an operation touches when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationCategory {
    /// Rewrites the working text.
    Transform,
    /// Collects matches into one of the extraction lists.
    Extraction,
    /// Sets one or more counters.
    Counting,
    /// Attaches a structured value to side metadata.
    Analysis,
}

/// The fixed set of operations every analyser knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinOperation {
    RemoveAlphabets,
    RemoveNumbers,
    RemovePunctuation,
    RemoveSpecialChars,
    RemoveNewlines,
    RemoveExtraSpaces,
    Uppercase,
    Lowercase,
    TitleCase,
    Reverse,
    Truncate,
    ExtractUrls,
    ExtractEmails,
    ExtractPhoneNumbers,
    ExtractHashtags,
    ExtractMentions,
    CountCharacters,
    CountAlphabets,
    CountNumbers,
    CountAlphanumeric,
    CountWords,
    CountSentences,
    AnalyzeSentiment,
    Summarize,
    Readability,
    DetectLanguage,
    CompareTexts,
}

impl BuiltinOperation {
    /// Every built-in, in canonical order.
    pub const ALL: [BuiltinOperation; 27] = [
        Self::RemoveAlphabets,
        Self::RemoveNumbers,
        Self::RemovePunctuation,
        Self::RemoveSpecialChars,
        Self::RemoveNewlines,
        Self::RemoveExtraSpaces,
        Self::Uppercase,
        Self::Lowercase,
        Self::TitleCase,
        Self::Reverse,
        Self::Truncate,
        Self::ExtractUrls,
        Self::ExtractEmails,
        Self::ExtractPhoneNumbers,
        Self::ExtractHashtags,
        Self::ExtractMentions,
        Self::CountCharacters,
        Self::CountAlphabets,
        Self::CountNumbers,
        Self::CountAlphanumeric,
        Self::CountWords,
        Self::CountSentences,
        Self::AnalyzeSentiment,
        Self::Summarize,
        Self::Readability,
        Self::DetectLanguage,
        Self::CompareTexts,
    ];

    /// Canonical id used in configs, logs and side metadata keys.
    pub fn id(&self) -> &'static str {
        match self {
            Self::RemoveAlphabets => "remove-alphabets",
            Self::RemoveNumbers => "remove-numbers",
            Self::RemovePunctuation => "remove-punctuation",
            Self::RemoveSpecialChars => "remove-special-chars",
            Self::RemoveNewlines => "remove-newlines",
            Self::RemoveExtraSpaces => "remove-extra-spaces",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::TitleCase => "title-case",
            Self::Reverse => "reverse",
            Self::Truncate => "truncate",
            Self::ExtractUrls => "extract-urls",
            Self::ExtractEmails => "extract-emails",
            Self::ExtractPhoneNumbers => "extract-phone-numbers",
            Self::ExtractHashtags => "extract-hashtags",
            Self::ExtractMentions => "extract-mentions",
            Self::CountCharacters => "count-characters",
            Self::CountAlphabets => "count-alphabets",
            Self::CountNumbers => "count-numbers",
            Self::CountAlphanumeric => "count-alphanumeric",
            Self::CountWords => "count-words",
            Self::CountSentences => "count-sentences",
            Self::AnalyzeSentiment => "analyze-sentiment",
            Self::Summarize => "summarize",
            Self::Readability => "readability",
            Self::DetectLanguage => "detect-language",
            Self::CompareTexts => "compare-texts",
        }
    }

    /// Legacy short id accepted as an alias.
    pub fn alias(&self) -> &'static str {
        match self {
            Self::RemoveAlphabets => "removealpha",
            Self::RemoveNumbers => "removenum",
            Self::RemovePunctuation => "removepunc",
            Self::RemoveSpecialChars => "removespecialchars",
            Self::RemoveNewlines => "newlineremover",
            Self::RemoveExtraSpaces => "extraspaceremover",
            Self::Uppercase => "fullcaps",
            Self::Lowercase => "lowercaps",
            Self::TitleCase => "titlecase",
            Self::Reverse => "reversetext",
            Self::Truncate => "truncatetext",
            Self::ExtractUrls => "extracturls",
            Self::ExtractEmails => "extractemails",
            Self::ExtractPhoneNumbers => "extractphonenumbers",
            Self::ExtractHashtags => "extracthashtags",
            Self::ExtractMentions => "extractmentions",
            Self::CountCharacters => "charcount",
            Self::CountAlphabets => "alphacount",
            Self::CountNumbers => "numcount",
            Self::CountAlphanumeric => "alphanumericcount",
            Self::CountWords => "wordcount",
            Self::CountSentences => "sentencecount",
            Self::AnalyzeSentiment => "analyzesentiment",
            Self::Summarize => "summarizetext",
            Self::Readability => "readabilityscore",
            Self::DetectLanguage => "detectlanguage",
            Self::CompareTexts => "comparetexts",
        }
    }

    /// Label written to the operation log when this operation runs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RemoveAlphabets => "Removed Alphabets",
            Self::RemoveNumbers => "Removed Numbers",
            Self::RemovePunctuation => "Removed Punctuations",
            Self::RemoveSpecialChars => "Removed Special Characters",
            Self::RemoveNewlines => "Removed New Line Characters",
            Self::RemoveExtraSpaces => "Removed Extra Spaces",
            Self::Uppercase => "Changed to Uppercase",
            Self::Lowercase => "Changed to Lowercase",
            Self::TitleCase => "Changed to Title Case",
            Self::Reverse => "Reversed Text",
            Self::Truncate => "Truncated Text",
            Self::ExtractUrls => "Extracted URLs",
            Self::ExtractEmails => "Extracted Emails",
            Self::ExtractPhoneNumbers => "Extracted Phone Numbers",
            Self::ExtractHashtags => "Extracted Hashtags",
            Self::ExtractMentions => "Extracted Mentions",
            Self::CountCharacters => "Counted Characters",
            Self::CountAlphabets => "Counted Alphabets",
            Self::CountNumbers => "Counted Numbers",
            Self::CountAlphanumeric => "Counted Alphanumeric Characters",
            Self::CountWords => "Counted Words",
            Self::CountSentences => "Counted Sentences",
            Self::AnalyzeSentiment => "Analyzed Sentiment",
            Self::Summarize => "Summarized Text",
            Self::Readability => "Calculated Readability",
            Self::DetectLanguage => "Detected Language",
            Self::CompareTexts => "Compared Texts",
        }
    }

    pub fn category(&self) -> OperationCategory {
        match self {
            Self::RemoveAlphabets
            | Self::RemoveNumbers
            | Self::RemovePunctuation
            | Self::RemoveSpecialChars
            | Self::RemoveNewlines
            | Self::RemoveExtraSpaces
            | Self::Uppercase
            | Self::Lowercase
            | Self::TitleCase
            | Self::Reverse
            | Self::Truncate => OperationCategory::Transform,
            Self::ExtractUrls
            | Self::ExtractEmails
            | Self::ExtractPhoneNumbers
            | Self::ExtractHashtags
            | Self::ExtractMentions => OperationCategory::Extraction,
            Self::CountCharacters
            | Self::CountAlphabets
            | Self::CountNumbers
            | Self::CountAlphanumeric
            | Self::CountWords
            | Self::CountSentences => OperationCategory::Counting,
            Self::AnalyzeSentiment
            | Self::Summarize
            | Self::Readability
            | Self::DetectLanguage
            | Self::CompareTexts => OperationCategory::Analysis,
        }
    }

    /// Whether the operation cannot run from a bare `true` flag.
    pub fn requires_config(&self) -> bool {
        matches!(self, Self::Truncate | Self::CompareTexts)
    }

    /// Resolves a canonical id or legacy alias (case-insensitive).
    pub fn lookup(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.id().eq_ignore_ascii_case(id) || op.alias().eq_ignore_ascii_case(id))
    }
}

impl fmt::Display for BuiltinOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BuiltinOperation {
    type Err = AnalyserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| AnalyserError::unknown(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_and_aliases_are_unique() {
        let mut seen = HashSet::new();
        for op in BuiltinOperation::ALL {
            assert!(seen.insert(op.id()), "duplicate id {}", op.id());
            assert!(seen.insert(op.alias()), "duplicate alias {}", op.alias());
        }
    }

    #[test]
    fn test_lookup_by_id_and_alias() {
        assert_eq!(
            BuiltinOperation::lookup("fullcaps"),
            Some(BuiltinOperation::Uppercase)
        );
        assert_eq!(
            BuiltinOperation::lookup("Remove-Alphabets"),
            Some(BuiltinOperation::RemoveAlphabets)
        );
        assert_eq!(BuiltinOperation::lookup("shout"), None);
        assert!("shout".parse::<BuiltinOperation>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_id() {
        let json = serde_json::to_string(&BuiltinOperation::CountSentences).unwrap();
        assert_eq!(json, "\"count-sentences\"");
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            BuiltinOperation::Reverse.category(),
            OperationCategory::Transform
        );
        assert_eq!(
            BuiltinOperation::ExtractMentions.category(),
            OperationCategory::Extraction
        );
        assert_eq!(
            BuiltinOperation::CompareTexts.category(),
            OperationCategory::Analysis
        );
        assert!(BuiltinOperation::Truncate.requires_config());
        assert!(!BuiltinOperation::Summarize.requires_config());
    }
}
