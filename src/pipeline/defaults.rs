use crate::comparison::marking::{membership_flags, positional_flags};
use crate::comparison::normalize::tokenize_with;
use crate::comparison::scoring::score;
use crate::config::{MarkingStrategy, DEFAULT_STRIPPED_PUNCTUATION};
use crate::pipeline::traits::{AccuracyScorer, Normalizer, WordMarker};
use crate::types::{MarkedWord, TokenizedWord};

pub struct PunctuationNormalizer {
    stripped_punctuation: String,
}

impl PunctuationNormalizer {
    pub fn new(stripped_punctuation: impl Into<String>) -> Self {
        Self {
            stripped_punctuation: stripped_punctuation.into(),
        }
    }
}

impl Default for PunctuationNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_STRIPPED_PUNCTUATION)
    }
}

impl Normalizer for PunctuationNormalizer {
    fn tokenize(&self, text: &str) -> Vec<TokenizedWord> {
        tokenize_with(text, &self.stripped_punctuation)
    }
}

pub struct MembershipWordMarker;

impl WordMarker for MembershipWordMarker {
    fn mark(&self, source: &[String], reference: &[String]) -> Vec<bool> {
        membership_flags(source, reference)
    }
}

pub struct PositionalWordMarker;

impl WordMarker for PositionalWordMarker {
    fn mark(&self, source: &[String], reference: &[String]) -> Vec<bool> {
        positional_flags(source, reference)
    }
}

pub struct RoundedPercentageScorer;

impl AccuracyScorer for RoundedPercentageScorer {
    fn score(&self, marked_reference_words: &[MarkedWord]) -> u8 {
        score(marked_reference_words)
    }
}

pub(crate) fn word_marker_for(strategy: MarkingStrategy) -> Box<dyn WordMarker> {
    match strategy {
        MarkingStrategy::Membership => Box::new(MembershipWordMarker),
        MarkingStrategy::Positional => Box::new(PositionalWordMarker),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn punctuation_normalizer_tokenize() {
        let normalizer = PunctuationNormalizer::default();
        let tokens = normalizer.tokenize("Hi, there!");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].normalized, "hi");
        assert_eq!(tokens[0].original, "Hi,");
        assert_eq!(tokens[1].normalized, "there");
    }

    #[test]
    fn punctuation_normalizer_custom_set() {
        let normalizer = PunctuationNormalizer::new("?");
        let tokens = normalizer.tokenize("Why? Because.");
        assert_eq!(tokens[0].normalized, "why");
        assert_eq!(tokens[1].normalized, "because.");
    }

    #[test]
    fn membership_word_marker_mark() {
        let flags = MembershipWordMarker.mark(&owned(&["b", "a", "z"]), &owned(&["a", "b"]));
        assert_eq!(flags, [true, true, false]);
    }

    #[test]
    fn positional_word_marker_mark() {
        let flags = PositionalWordMarker.mark(&owned(&["b", "a", "z"]), &owned(&["a", "a"]));
        assert_eq!(flags, [false, true, false]);
    }

    #[test]
    fn rounded_percentage_scorer_score() {
        let marked = vec![
            MarkedWord::new("a", true),
            MarkedWord::new("b", false),
            MarkedWord::new("c", true),
        ];
        assert_eq!(RoundedPercentageScorer.score(&marked), 67);
        assert_eq!(RoundedPercentageScorer.score(&[]), 0);
    }

    #[test]
    fn word_marker_for_strategy() {
        let source = owned(&["x", "y"]);
        let reference = owned(&["y", "x"]);
        let membership = word_marker_for(MarkingStrategy::Membership);
        let positional = word_marker_for(MarkingStrategy::Positional);
        assert_eq!(membership.mark(&source, &reference), [true, true]);
        assert_eq!(positional.mark(&source, &reference), [false, false]);
    }
}
