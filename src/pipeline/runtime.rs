use crate::config::{ComparisonConfig, WordDisplay};
use crate::pipeline::defaults::{
    word_marker_for, MembershipWordMarker, PunctuationNormalizer, RoundedPercentageScorer,
};
use crate::pipeline::traits::{AccuracyScorer, Normalizer, WordMarker};
use crate::types::{ComparisonResult, MarkedWord, TokenizedWord};

pub struct TextComparer {
    display: WordDisplay,
    normalizer: Box<dyn Normalizer>,
    /// Grades reference words; the accuracy is always derived from these flags.
    word_marker: Box<dyn WordMarker>,
    /// Highlights spoken words only.
    spoken_marker: Box<dyn WordMarker>,
    scorer: Box<dyn AccuracyScorer>,
}

pub(crate) struct TextComparerParts {
    pub display: WordDisplay,
    pub normalizer: Box<dyn Normalizer>,
    pub word_marker: Box<dyn WordMarker>,
    pub spoken_marker: Box<dyn WordMarker>,
    pub scorer: Box<dyn AccuracyScorer>,
}

impl TextComparer {
    pub(crate) fn from_parts(parts: TextComparerParts) -> Self {
        Self {
            display: parts.display,
            normalizer: parts.normalizer,
            word_marker: parts.word_marker,
            spoken_marker: parts.spoken_marker,
            scorer: parts.scorer,
        }
    }

    pub fn display(&self) -> WordDisplay {
        self.display
    }

    pub fn tokenize(&self, text: &str) -> Vec<TokenizedWord> {
        self.normalizer.tokenize(text)
    }

    pub fn compare(&self, reference: &str, spoken: &str) -> ComparisonResult {
        let reference_tokens = self.tokenize(reference);
        let spoken_tokens = self.tokenize(spoken);
        self.compare_tokens(&reference_tokens, &spoken_tokens)
    }

    pub fn compare_optional(&self, reference: Option<&str>, spoken: Option<&str>) -> ComparisonResult {
        self.compare(reference.unwrap_or_default(), spoken.unwrap_or_default())
    }

    pub fn compare_tokens(
        &self,
        reference_tokens: &[TokenizedWord],
        spoken_tokens: &[TokenizedWord],
    ) -> ComparisonResult {
        let reference_words = normalized_words(reference_tokens);
        let spoken_words = normalized_words(spoken_tokens);

        let reference_flags = self.word_marker.mark(&reference_words, &spoken_words);
        let spoken_flags = self.spoken_marker.mark(&spoken_words, &reference_words);

        let marked_reference_words = self.assemble(reference_tokens, &reference_flags);
        let marked_spoken_words = self.assemble(spoken_tokens, &spoken_flags);
        let accuracy = self.scorer.score(&marked_reference_words).min(100);

        tracing::debug!(
            reference_words = marked_reference_words.len(),
            spoken_words = marked_spoken_words.len(),
            accuracy,
            "compared transcripts"
        );

        ComparisonResult {
            accuracy,
            marked_reference_words,
            marked_spoken_words,
        }
    }

    fn assemble(&self, tokens: &[TokenizedWord], flags: &[bool]) -> Vec<MarkedWord> {
        if flags.len() != tokens.len() {
            tracing::warn!(
                tokens = tokens.len(),
                flags = flags.len(),
                "word marker returned a flag count different from the word count; unflagged words are marked incorrect"
            );
        }
        tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| {
                let word = match self.display {
                    WordDisplay::Normalized => token.normalized.clone(),
                    WordDisplay::Original => token.original.clone(),
                };
                MarkedWord::new(word, flags.get(idx).copied().unwrap_or(false))
            })
            .collect()
    }
}

impl Default for TextComparer {
    fn default() -> Self {
        let config = ComparisonConfig::default();
        Self::from_parts(TextComparerParts {
            display: config.display,
            normalizer: Box::new(PunctuationNormalizer::new(config.stripped_punctuation)),
            word_marker: Box::new(MembershipWordMarker),
            spoken_marker: word_marker_for(config.marking),
            scorer: Box::new(RoundedPercentageScorer),
        })
    }
}

fn normalized_words(tokens: &[TokenizedWord]) -> Vec<String> {
    tokens.iter().map(|token| token.normalized.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::compare_texts;

    struct ShortMarker;

    impl WordMarker for ShortMarker {
        fn mark(&self, _source: &[String], _reference: &[String]) -> Vec<bool> {
            vec![true]
        }
    }

    #[test]
    fn default_comparer_matches_compare_texts() {
        let comparer = TextComparer::default();
        let cases = [
            ("I like to eat apples", "I like eat bananas"),
            ("Hello, World!", "hello world"),
            ("", "anything"),
            ("the quick brown fox", ""),
            ("well-known facts; (mostly)", "wellknown FACTS mostly?"),
        ];
        for (reference, spoken) in cases {
            assert_eq!(comparer.compare(reference, spoken), compare_texts(reference, spoken));
        }
    }

    #[test]
    fn compare_optional_treats_missing_as_empty() {
        let comparer = TextComparer::default();
        let result = comparer.compare_optional(None, Some("hi"));
        assert_eq!(result.accuracy, 0);
        assert!(result.marked_reference_words.is_empty());
        assert_eq!(result.marked_spoken_words.len(), 1);
    }

    #[test]
    fn short_flag_vector_marks_remaining_words_incorrect() {
        let comparer = TextComparer::from_parts(TextComparerParts {
            display: WordDisplay::Normalized,
            normalizer: Box::new(PunctuationNormalizer::default()),
            word_marker: Box::new(ShortMarker),
            spoken_marker: Box::new(MembershipWordMarker),
            scorer: Box::new(RoundedPercentageScorer),
        });
        let result = comparer.compare("a b", "a b");
        assert!(result.marked_reference_words[0].is_correct);
        assert!(!result.marked_reference_words[1].is_correct);
        assert_eq!(result.accuracy, 50);
    }
}
