//! Operations that collect pattern matches without touching the text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{BuiltinOperation, TextState};

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bhttps?://[^\s<>"']+|\bwww\.[^\s<>"']+"#).expect("valid regex")
});
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid regex")
});
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("valid regex")
});
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\B#\w+").expect("valid regex"));
static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\B@\w+").expect("valid regex"));

/// Sentence punctuation that sticks to the end of a URL in prose.
const URL_TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

pub(crate) fn apply(operation: BuiltinOperation, state: &mut TextState) {
    let text = state.text.as_str();
    let extractions = &mut state.extractions;
    match operation {
        BuiltinOperation::ExtractUrls => extractions.urls = extract_urls(text),
        BuiltinOperation::ExtractEmails => extractions.emails = find_all(&EMAIL, text),
        BuiltinOperation::ExtractPhoneNumbers => {
            extractions.phone_numbers = find_all(&PHONE, text)
        }
        BuiltinOperation::ExtractHashtags => extractions.hashtags = find_all(&HASHTAG, text),
        BuiltinOperation::ExtractMentions => extractions.mentions = find_all(&MENTION, text),
        _ => {}
    }
}

fn find_all(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn extract_urls(text: &str) -> Vec<String> {
    URL.find_iter(text)
        .map(|m| m.as_str().trim_end_matches(URL_TRAILING).to_string())
        .collect()
}

pub fn extract_emails(text: &str) -> Vec<String> {
    find_all(&EMAIL, text)
}

pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    find_all(&PHONE, text)
}

/// Hashtags need a non-word character (or the start of text) before `#`.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    find_all(&HASHTAG, text)
}

/// Same rule as hashtags, which keeps email addresses out.
pub fn extract_mentions(text: &str) -> Vec<String> {
    find_all(&MENTION, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = "Ping @alice or mail bob.smith@example.org about #rust and #async. \
        Docs: https://docs.rs/regex, mirror at www.rust-lang.org. Call 555-123-4567 \
        or +1 (555) 987-6543.";

    #[test]
    fn test_urls_drop_trailing_punctuation() {
        assert_eq!(
            extract_urls(POST),
            vec!["https://docs.rs/regex", "www.rust-lang.org"]
        );
    }

    #[test]
    fn test_emails_and_mentions_do_not_overlap() {
        assert_eq!(extract_emails(POST), vec!["bob.smith@example.org"]);
        assert_eq!(extract_mentions(POST), vec!["@alice"]);
    }

    #[test]
    fn test_hashtags() {
        assert_eq!(extract_hashtags(POST), vec!["#rust", "#async"]);
        assert!(extract_hashtags("issue#42").is_empty());
    }

    #[test]
    fn test_phone_numbers() {
        assert_eq!(
            extract_phone_numbers(POST),
            vec!["555-123-4567", "+1 (555) 987-6543"]
        );
    }

    #[test]
    fn test_apply_leaves_text_alone() {
        let mut state = TextState::new(POST);
        apply(BuiltinOperation::ExtractHashtags, &mut state);
        assert_eq!(state.text, POST);
        assert_eq!(state.extractions.hashtags.len(), 2);
        assert!(state.extractions.urls.is_empty());
    }
}
