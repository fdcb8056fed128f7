//! Operations that attach structured results to side metadata.

use std::borrow::Cow;

use crate::analysis::{
    flesch_kincaid_readability, LanguageDetector, SentimentAnalyzer, TextDiff, TextSummarizer,
};
use crate::core::{
    BuiltinOperation, CompareConfig, DetectLanguageConfig, OperationSetting, SentimentConfig,
    SideMetadata, SummarizeConfig, TextState,
};
use crate::error::{AnalyserError, Result};

/// The per-analyser analyzer instances.
///
/// Each analyser owns its own set, so lexicon and profile extensions stay
/// local to it. Per-run extras supplied through an operation's config are
/// applied to a copy and never stick.
#[derive(Debug, Clone, Default)]
pub struct Analyzers {
    pub sentiment: SentimentAnalyzer,
    pub summarizer: TextSummarizer,
    pub language: LanguageDetector,
}

pub(crate) fn apply(
    operation: BuiltinOperation,
    state: &mut TextState,
    setting: &OperationSetting,
    analyzers: &Analyzers,
) -> Result<()> {
    let id = operation.id();
    let text = state.text.as_str();

    let value = match operation {
        BuiltinOperation::AnalyzeSentiment => {
            let config: SentimentConfig = setting.parse(id)?.unwrap_or_default();
            let analyzer = if config.positive.is_empty() && config.negative.is_empty() {
                Cow::Borrowed(&analyzers.sentiment)
            } else {
                let mut extended = analyzers.sentiment.clone();
                extended.add_custom_lexicon(&config.positive, &config.negative);
                Cow::Owned(extended)
            };
            let result = analyzer.analyze(text).map_err(|e| e.into_execution(id))?;
            SideMetadata::Sentiment(result)
        }
        BuiltinOperation::Summarize => {
            let config: SummarizeConfig = setting.parse(id)?.unwrap_or_default();
            let summarizer = if config.stop_words.is_empty() {
                Cow::Borrowed(&analyzers.summarizer)
            } else {
                let mut extended = analyzers.summarizer.clone();
                extended.add_stop_words(&config.stop_words);
                Cow::Owned(extended)
            };
            SideMetadata::Summary(summarizer.summarize(text, config.sentence_count))
        }
        BuiltinOperation::Readability => {
            SideMetadata::Readability(flesch_kincaid_readability(text))
        }
        BuiltinOperation::DetectLanguage => {
            let config: DetectLanguageConfig = setting.parse(id)?.unwrap_or_default();
            let detector = if config.languages.is_empty() {
                Cow::Borrowed(&analyzers.language)
            } else {
                let mut extended = analyzers.language.clone();
                for (name, profile) in config.languages {
                    extended.add_custom_language(&name, profile);
                }
                Cow::Owned(extended)
            };
            SideMetadata::LanguageDetection(detector.detect(text))
        }
        BuiltinOperation::CompareTexts => {
            let config = compare_config(operation, setting)?;
            SideMetadata::TextComparison(TextDiff::compare(text, &config.compare_with))
        }
        other => {
            return Err(AnalyserError::execution(
                other.id(),
                "not an analysis operation",
            ))
        }
    };

    state.side_metadata.insert(id.to_string(), value);
    Ok(())
}

fn compare_config(operation: BuiltinOperation, setting: &OperationSetting) -> Result<CompareConfig> {
    match setting.get("compareWith") {
        Some(serde_json::Value::String(other)) => Ok(CompareConfig {
            compare_with: other.clone(),
        }),
        _ => Err(AnalyserError::missing_config(
            operation.id(),
            "compareWith must be a string",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analyse(op: BuiltinOperation, text: &str, setting: OperationSetting) -> Result<TextState> {
        let mut state = TextState::new(text);
        apply(op, &mut state, &setting, &Analyzers::default())?;
        Ok(state)
    }

    #[test]
    fn test_sentiment_lands_in_side_metadata() {
        let state = analyse(
            BuiltinOperation::AnalyzeSentiment,
            "What a great and lovely day",
            OperationSetting::flag(true),
        )
        .unwrap();
        match &state.side_metadata["analyze-sentiment"] {
            SideMetadata::Sentiment(result) => assert_eq!(result.positive_word_count, 2),
            other => panic!("unexpected metadata: {other:?}"),
        }
        assert_eq!(state.text, "What a great and lovely day");
    }

    #[test]
    fn test_sentiment_on_empty_text_is_execution_error() {
        let err = analyse(
            BuiltinOperation::AnalyzeSentiment,
            "",
            OperationSetting::flag(true),
        )
        .unwrap_err();
        assert!(matches!(err, AnalyserError::OperationExecution { .. }));
    }

    #[test]
    fn test_sentiment_config_extends_a_copy() {
        let analyzers = Analyzers::default();
        let mut state = TextState::new("that was rad");
        apply(
            BuiltinOperation::AnalyzeSentiment,
            &mut state,
            &OperationSetting::with_config(json!({ "positive": ["rad"] })),
            &analyzers,
        )
        .unwrap();
        match &state.side_metadata["analyze-sentiment"] {
            SideMetadata::Sentiment(result) => assert_eq!(result.positive_word_count, 1),
            other => panic!("unexpected metadata: {other:?}"),
        }
        assert!(!analyzers.sentiment.is_positive("rad"));
    }

    #[test]
    fn test_compare_texts_requires_string() {
        for setting in [
            OperationSetting::flag(true),
            OperationSetting::with_config(json!({ "compareWith": 42 })),
        ] {
            let err = analyse(BuiltinOperation::CompareTexts, "abc", setting).unwrap_err();
            assert!(matches!(err, AnalyserError::MissingConfig { .. }));
        }

        let state = analyse(
            BuiltinOperation::CompareTexts,
            "kitten",
            OperationSetting::with_config(json!({ "compareWith": "sitting" })),
        )
        .unwrap();
        match &state.side_metadata["compare-texts"] {
            SideMetadata::TextComparison(diff) => assert_eq!(diff.edit_distance, 3),
            other => panic!("unexpected metadata: {other:?}"),
        }
    }

    #[test]
    fn test_summarize_uses_sentence_count() {
        let state = analyse(
            BuiltinOperation::Summarize,
            "Cats sleep. Dogs run fast. Dogs love dogs.",
            OperationSetting::with_config(json!({ "sentenceCount": 1 })),
        )
        .unwrap();
        match &state.side_metadata["summarize"] {
            SideMetadata::Summary(summary) => assert_eq!(summary.summary_sentence_count, 1),
            other => panic!("unexpected metadata: {other:?}"),
        }
    }

    #[test]
    fn test_detect_language_with_extra_profile() {
        let state = analyse(
            BuiltinOperation::DetectLanguage,
            "qapla qapla",
            OperationSetting::with_config(json!({ "languages": { "klingon": { "qapla": 5.0 } } })),
        )
        .unwrap();
        match &state.side_metadata["detect-language"] {
            SideMetadata::LanguageDetection(result) => {
                assert_eq!(result.detected_language, "klingon")
            }
            other => panic!("unexpected metadata: {other:?}"),
        }
    }
}
