//! Character-level edit distance and word-level bag diff between two texts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::round_to;

/// Shortest shared run reported in [`TextDiffResult::common_substrings`].
pub const MIN_COMMON_SUBSTRING: usize = 4;
/// How many shared runs are kept.
pub const MAX_COMMON_SUBSTRINGS: usize = 5;

/// Multiset difference of lowercased whitespace tokens.
///
/// Tokens repeat in each list once per unit of multiplicity, ordered by
/// first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDifference {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub unchanged: Vec<String>,
    pub added_count: usize,
    pub removed_count: usize,
    pub unchanged_count: usize,
}

/// A run of characters both texts share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonSubstring {
    pub substring: String,
    /// Length in chars.
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDiffResult {
    /// Percentage in 0..=100, two decimals.
    pub similarity: f64,
    pub edit_distance: usize,
    pub common_substrings: Vec<CommonSubstring>,
    pub word_difference: WordDifference,
}

/// Stateless comparison helpers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDiff;

impl TextDiff {
    pub fn compare(original: &str, other: &str) -> TextDiffResult {
        let a: Vec<char> = original.chars().collect();
        let b: Vec<char> = other.chars().collect();

        let edit_distance = levenshtein(&a, &b);
        let longest = a.len().max(b.len());
        let similarity = if longest == 0 {
            100.0
        } else {
            round_to((longest - edit_distance) as f64 / longest as f64 * 100.0, 2)
        };

        TextDiffResult {
            similarity,
            edit_distance,
            common_substrings: common_substrings(&a, &b),
            word_difference: word_difference(original, other),
        }
    }
}

/// Full-matrix Levenshtein distance over chars.
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        matrix[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a.len()][b.len()]
}

/// Longest match starting at every pair of positions, kept when at least
/// [`MIN_COMMON_SUBSTRING`] chars long. Deduplicated, longest first.
fn common_substrings(a: &[char], b: &[char]) -> Vec<CommonSubstring> {
    let mut found: Vec<CommonSubstring> = Vec::new();

    for i in 0..a.len() {
        for j in 0..b.len() {
            let len = a[i..]
                .iter()
                .zip(&b[j..])
                .take_while(|(x, y)| x == y)
                .count();
            if len >= MIN_COMMON_SUBSTRING {
                let run: String = a[i..i + len].iter().collect();
                if !found.iter().any(|c| c.substring == run) {
                    found.push(CommonSubstring {
                        substring: run,
                        length: len,
                    });
                }
            }
        }
    }

    // stable: equal lengths stay in discovery order
    found.sort_by(|x, y| y.length.cmp(&x.length));
    found.truncate(MAX_COMMON_SUBSTRINGS);
    found
}

fn word_difference(original: &str, other: &str) -> WordDifference {
    let mut bag: IndexMap<String, (usize, usize)> = IndexMap::new();
    for word in original.split_whitespace() {
        bag.entry(word.to_lowercase()).or_default().0 += 1;
    }
    for word in other.split_whitespace() {
        bag.entry(word.to_lowercase()).or_default().1 += 1;
    }

    let mut diff = WordDifference::default();
    for (word, (before, after)) in bag {
        let kept = before.min(after);
        diff.unchanged.extend(std::iter::repeat(word.clone()).take(kept));
        if after > before {
            diff.added
                .extend(std::iter::repeat(word.clone()).take(after - before));
        } else if before > after {
            diff.removed
                .extend(std::iter::repeat(word).take(before - after));
        }
    }

    diff.added_count = diff.added.len();
    diff.removed_count = diff.removed.len();
    diff.unchanged_count = diff.unchanged.len();
    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_levenshtein_classic() {
        assert_eq!(levenshtein(&chars("kitten"), &chars("sitting")), 3);
        assert_eq!(levenshtein(&chars(""), &chars("abc")), 3);
        assert_eq!(levenshtein(&chars("flaw"), &chars("lawn")), 2);
    }

    #[test]
    fn test_identical_and_empty() {
        let same = TextDiff::compare("same text", "same text");
        assert_eq!(same.edit_distance, 0);
        assert_eq!(same.similarity, 100.0);

        let empty = TextDiff::compare("", "");
        assert_eq!(empty.edit_distance, 0);
        assert_eq!(empty.similarity, 100.0);
        assert!(empty.common_substrings.is_empty());
    }

    #[test]
    fn test_similarity_is_rounded_percentage() {
        // distance 3 over 7 chars
        let result = TextDiff::compare("kitten", "sitting");
        assert_eq!(result.similarity, 57.14);
    }

    #[test]
    fn test_common_substrings_longest_first() {
        let result = TextDiff::compare("hello world", "world hello");
        assert_eq!(
            result.common_substrings[0],
            CommonSubstring {
                substring: "hello".to_string(),
                length: 5,
            }
        );
        assert!(result.common_substrings.iter().any(|c| c.substring == "world"));
        assert!(result.common_substrings.len() <= MAX_COMMON_SUBSTRINGS);
        assert!(result
            .common_substrings
            .iter()
            .all(|c| c.length >= MIN_COMMON_SUBSTRING
                && c.substring.chars().count() == c.length));
    }

    #[test]
    fn test_common_substrings_serialise_with_length() {
        let result = TextDiff::compare("hello world", "world hello");
        let json = serde_json::to_value(&result.common_substrings).unwrap();
        assert_eq!(json[0], serde_json::json!({ "substring": "hello", "length": 5 }));
        assert!(json
            .as_array()
            .unwrap()
            .iter()
            .all(|entry| entry["length"].is_u64()));
    }

    #[test]
    fn test_word_difference_counts_multiplicity() {
        let result = TextDiff::compare("the cat the end", "The dog the dog end");
        let diff = result.word_difference;
        assert_eq!(diff.unchanged, vec!["the", "the", "end"]);
        assert_eq!(diff.removed, vec!["cat"]);
        assert_eq!(diff.added, vec!["dog", "dog"]);
        assert_eq!(diff.added_count, 2);
        assert_eq!(diff.removed_count, 1);
        assert_eq!(diff.unchanged_count, 3);
    }
}
