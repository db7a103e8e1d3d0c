use crate::config::ComparisonConfig;
use crate::error::ComparisonError;
use crate::pipeline::defaults::{
    word_marker_for, MembershipWordMarker, PunctuationNormalizer, RoundedPercentageScorer,
};
use crate::pipeline::runtime::{TextComparer, TextComparerParts};
use crate::pipeline::traits::{AccuracyScorer, Normalizer, WordMarker};

pub struct TextComparerBuilder {
    config: ComparisonConfig,
    normalizer: Option<Box<dyn Normalizer>>,
    word_marker: Option<Box<dyn WordMarker>>,
    spoken_marker: Option<Box<dyn WordMarker>>,
    scorer: Option<Box<dyn AccuracyScorer>>,
}

impl TextComparerBuilder {
    pub fn new(config: ComparisonConfig) -> Self {
        Self {
            config,
            normalizer: None,
            word_marker: None,
            spoken_marker: None,
            scorer: None,
        }
    }

    pub fn with_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Replaces the reference grader, which also drives the accuracy.
    pub fn with_word_marker(mut self, word_marker: Box<dyn WordMarker>) -> Self {
        self.word_marker = Some(word_marker);
        self
    }

    /// Replaces the marker used to highlight spoken words. Reference grading
    /// and the accuracy are unaffected.
    pub fn with_spoken_marker(mut self, spoken_marker: Box<dyn WordMarker>) -> Self {
        self.spoken_marker = Some(spoken_marker);
        self
    }

    pub fn with_scorer(mut self, scorer: Box<dyn AccuracyScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn build(self) -> Result<TextComparer, ComparisonError> {
        self.config.validate()?;

        let ComparisonConfig {
            stripped_punctuation,
            display,
            marking,
        } = self.config;

        Ok(TextComparer::from_parts(TextComparerParts {
            display,
            normalizer: self
                .normalizer
                .unwrap_or_else(|| Box::new(PunctuationNormalizer::new(stripped_punctuation))),
            word_marker: self
                .word_marker
                .unwrap_or_else(|| Box::new(MembershipWordMarker)),
            spoken_marker: self
                .spoken_marker
                .unwrap_or_else(|| word_marker_for(marking)),
            scorer: self
                .scorer
                .unwrap_or_else(|| Box::new(RoundedPercentageScorer)),
        }))
    }
}
