//! Operations that set counters from the current text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{BuiltinOperation, TextState};

static VISIBLE_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\s\p{Cf}]").expect("valid regex"));
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("valid regex"));

pub(crate) fn apply(operation: BuiltinOperation, state: &mut TextState) {
    let text = state.text.as_str();
    let counts = &mut state.counts;
    match operation {
        BuiltinOperation::CountCharacters => counts.character_count = count_characters(text),
        BuiltinOperation::CountAlphabets => counts.alphabet_count = count_alphabets(text),
        BuiltinOperation::CountNumbers => counts.numeric_count = count_numbers(text),
        BuiltinOperation::CountAlphanumeric => {
            counts.alphabet_count = count_alphabets(text);
            counts.numeric_count = count_numbers(text);
        }
        BuiltinOperation::CountWords => counts.word_count = count_words(text),
        BuiltinOperation::CountSentences => counts.sentence_count = count_sentences(text),
        _ => {}
    }
}

/// Code points that are neither whitespace nor invisible format controls.
pub fn count_characters(text: &str) -> usize {
    VISIBLE_CHAR.find_iter(text).count()
}

pub fn count_alphabets(text: &str) -> usize {
    text.chars().filter(char::is_ascii_alphabetic).count()
}

pub fn count_numbers(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Pieces left after splitting on terminal punctuation followed by whitespace.
///
/// A trailing fragment without punctuation still counts as a sentence.
pub fn count_sentences(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }
    SENTENCE_BREAK
        .split(trimmed)
        .filter(|piece| !piece.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_characters_skips_whitespace_and_format_controls() {
        assert_eq!(count_characters("  23  "), 2);
        assert_eq!(count_characters("a\u{200B}b\tc\n"), 3);
        assert_eq!(count_characters(""), 0);
    }

    #[test]
    fn test_alphabets_and_numbers() {
        assert_eq!(count_alphabets("abc123é"), 3);
        assert_eq!(count_numbers("abc123é"), 3);
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("  one two\tthree\nfour "), 4);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn test_count_sentences() {
        assert_eq!(count_sentences("Hello. World! Are you ok?"), 3);
        assert_eq!(count_sentences("Hello world"), 1);
        assert_eq!(count_sentences("Wait... what?!  Really"), 3);
        assert_eq!(count_sentences("   "), 0);
    }

    #[test]
    fn test_alphanumeric_sets_both_counters() {
        let mut state = TextState::new("ab12c");
        apply(BuiltinOperation::CountAlphanumeric, &mut state);
        assert_eq!(state.counts.alphabet_count, 3);
        assert_eq!(state.counts.numeric_count, 2);
        assert_eq!(state.counts.word_count, 0);
    }
}
