pub mod marking;
pub mod normalize;
pub mod scoring;

use crate::types::ComparisonResult;

pub use marking::{mark_words, mark_words_positional};
pub use normalize::{normalize, normalize_optional, normalize_with, tokenize_with};
pub use scoring::{accuracy_percent, score};

/// Grades `spoken` against `reference` by word presence.
///
/// Each reference word is correct if it appears anywhere in the spoken text
/// and each spoken word is correct if it appears anywhere in the reference.
/// Word order is not considered. `accuracy` is the rounded percentage of
/// reference words found.
pub fn compare_texts(reference: &str, spoken: &str) -> ComparisonResult {
    let reference_tokens = normalize(reference);
    let spoken_tokens = normalize(spoken);

    let marked_reference_words = mark_words(&reference_tokens, &spoken_tokens);
    let marked_spoken_words = mark_words(&spoken_tokens, &reference_tokens);
    let accuracy = score(&marked_reference_words);

    ComparisonResult {
        accuracy,
        marked_reference_words,
        marked_spoken_words,
    }
}

/// [`compare_texts`] for transcripts that may not be loaded yet.
pub fn compare_optional_texts(reference: Option<&str>, spoken: Option<&str>) -> ComparisonResult {
    compare_texts(reference.unwrap_or_default(), spoken.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MarkedWord;

    fn words(marked: &[MarkedWord]) -> Vec<(&str, bool)> {
        marked.iter().map(|w| (w.word.as_str(), w.is_correct)).collect()
    }

    #[test]
    fn perfect_match() {
        let result = compare_texts("the quick brown fox", "the quick brown fox");
        assert_eq!(result.accuracy, 100);
        assert!(result.marked_reference_words.iter().all(|w| w.is_correct));
        assert!(result.marked_spoken_words.iter().all(|w| w.is_correct));
        assert_eq!(result.marked_reference_words.len(), 4);
        assert_eq!(result.marked_spoken_words.len(), 4);
    }

    #[test]
    fn empty_reference_scores_zero() {
        let result = compare_texts("", "anything");
        assert_eq!(result.accuracy, 0);
        assert!(result.marked_reference_words.is_empty());
        assert_eq!(words(&result.marked_spoken_words), [("anything", false)]);
    }

    #[test]
    fn empty_spoken_scores_zero() {
        let result = compare_texts("the quick brown fox", "");
        assert_eq!(result.accuracy, 0);
        assert_eq!(result.marked_reference_words.len(), 4);
        assert!(result.marked_reference_words.iter().all(|w| !w.is_correct));
        assert!(result.marked_spoken_words.is_empty());
    }

    #[test]
    fn case_and_punctuation_are_ignored() {
        let result = compare_texts("Hello, World!", "hello world");
        assert_eq!(result.accuracy, 100);
        assert_eq!(words(&result.marked_reference_words), [("hello", true), ("world", true)]);
    }

    #[test]
    fn word_order_is_not_graded() {
        let result = compare_texts("the quick brown fox", "fox brown quick the");
        assert_eq!(result.accuracy, 100);
        assert!(result.marked_spoken_words.iter().all(|w| w.is_correct));
    }

    #[test]
    fn partial_match() {
        let result = compare_texts("I like to eat apples", "I like eat bananas");
        assert_eq!(result.accuracy, 60);
        assert_eq!(
            words(&result.marked_reference_words),
            [("i", true), ("like", true), ("to", false), ("eat", true), ("apples", false)]
        );
        assert_eq!(
            words(&result.marked_spoken_words),
            [("i", true), ("like", true), ("eat", true), ("bananas", false)]
        );
    }

    #[test]
    fn repeated_spoken_words_are_not_penalized() {
        let result = compare_texts("go home", "go go go home home");
        assert_eq!(result.accuracy, 100);
        assert_eq!(result.marked_spoken_words.len(), 5);
        assert!(result.marked_spoken_words.iter().all(|w| w.is_correct));
    }

    #[test]
    fn missing_texts_are_treated_as_empty() {
        assert_eq!(compare_optional_texts(None, None), ComparisonResult::empty());
        let result = compare_optional_texts(Some("one two"), None);
        assert_eq!(result.accuracy, 0);
        assert_eq!(result.marked_reference_words.len(), 2);
        let result = compare_optional_texts(None, Some("one"));
        assert_eq!(result.accuracy, 0);
        assert_eq!(words(&result.marked_spoken_words), [("one", false)]);
    }
}
