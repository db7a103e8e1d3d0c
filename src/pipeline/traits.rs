use crate::types::{MarkedWord, TokenizedWord};

pub trait Normalizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<TokenizedWord>;
}

pub trait WordMarker: Send + Sync {
    /// Returns one flag per `source` word.
    fn mark(&self, source: &[String], reference: &[String]) -> Vec<bool>;
}

pub trait AccuracyScorer: Send + Sync {
    fn score(&self, marked_reference_words: &[MarkedWord]) -> u8;
}
