pub mod comparison;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod types;

pub use comparison::{compare_optional_texts, compare_texts, mark_words, normalize, score};
pub use config::{ComparisonConfig, MarkingStrategy, WordDisplay};
pub use error::ComparisonError;
pub use pipeline::builder::TextComparerBuilder;
pub use pipeline::runtime::TextComparer;
pub use pipeline::traits::{AccuracyScorer, Normalizer, WordMarker};
pub use report::{
    aggregate_reports, build_report, compute_segment_report, PracticeReport, SegmentReport,
};
pub use types::{ComparisonResult, MarkedWord, PracticeAttempt, Segment, TokenizedWord};
