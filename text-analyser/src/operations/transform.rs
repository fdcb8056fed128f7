//! Operations that rewrite the working text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use unicode_segmentation::UnicodeSegmentation;

use crate::core::{BuiltinOperation, OperationSetting, TextState, TruncateConfig};
use crate::error::{AnalyserError, Result};

static ALPHABETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]").expect("valid regex"));
static NUMBERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("valid regex"));
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[[:punct:]]").expect("valid regex"));
static SPECIAL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:\r\n?|\n)").expect("valid regex"));
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("valid regex"));
static TITLE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w\S*").expect("valid regex"));

pub(crate) fn apply(
    operation: BuiltinOperation,
    state: &mut TextState,
    setting: &OperationSetting,
) -> Result<()> {
    let text = state.text.as_str();
    let rewritten = match operation {
        BuiltinOperation::RemoveAlphabets => remove_alphabets(text),
        BuiltinOperation::RemoveNumbers => remove_numbers(text),
        BuiltinOperation::RemovePunctuation => remove_punctuation(text),
        BuiltinOperation::RemoveSpecialChars => remove_special_chars(text),
        BuiltinOperation::RemoveNewlines => remove_newlines(text),
        BuiltinOperation::RemoveExtraSpaces => remove_extra_spaces(text),
        BuiltinOperation::Uppercase => text.to_uppercase(),
        BuiltinOperation::Lowercase => text.to_lowercase(),
        BuiltinOperation::TitleCase => title_case(text),
        BuiltinOperation::Reverse => reverse(text),
        BuiltinOperation::Truncate => {
            let config = truncate_config(operation, setting)?;
            truncate(text, config.max_length, &config.suffix)
        }
        other => {
            return Err(AnalyserError::execution(
                other.id(),
                "not a text transformation",
            ))
        }
    };

    state.text = rewritten;
    Ok(())
}

fn truncate_config(operation: BuiltinOperation, setting: &OperationSetting) -> Result<TruncateConfig> {
    if setting.get("maxLength").map_or(true, |v| v.is_null()) {
        return Err(AnalyserError::missing_config(
            operation.id(),
            "maxLength is required",
        ));
    }
    setting
        .parse::<TruncateConfig>(operation.id())?
        .ok_or_else(|| AnalyserError::missing_config(operation.id(), "maxLength is required"))
}

pub fn remove_alphabets(text: &str) -> String {
    ALPHABETS.replace_all(text, "").into_owned()
}

pub fn remove_numbers(text: &str) -> String {
    NUMBERS.replace_all(text, "").into_owned()
}

/// Strips ASCII punctuation.
pub fn remove_punctuation(text: &str) -> String {
    PUNCTUATION.replace_all(text, "").into_owned()
}

/// Keeps only word characters and whitespace.
pub fn remove_special_chars(text: &str) -> String {
    SPECIAL_CHARS.replace_all(text, "").into_owned()
}

/// Drops blank lines, then trims.
pub fn remove_newlines(text: &str) -> String {
    BLANK_LINE.replace_all(text, "").trim().to_string()
}

/// Collapses runs of spaces into one, then trims.
pub fn remove_extra_spaces(text: &str) -> String {
    SPACE_RUN.replace_all(text, " ").trim().to_string()
}

pub fn title_case(text: &str) -> String {
    TITLE_WORD
        .replace_all(text, |caps: &Captures| {
            let word = &caps[0];
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.as_str().to_lowercase().chars())
                    .collect(),
                None => String::new(),
            }
        })
        .into_owned()
}

/// Reverses by grapheme cluster so combined characters stay intact.
pub fn reverse(text: &str) -> String {
    text.graphemes(true).rev().collect()
}

/// Cuts to `max_length` characters and appends `suffix`; shorter text is untouched.
pub fn truncate(text: &str, max_length: usize, suffix: &str) -> String {
    match text.char_indices().nth(max_length) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], suffix),
    }
}
