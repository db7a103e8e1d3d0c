use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkedWord {
    pub word: String,
    /// True when the word occurs anywhere in the other text's tokens.
    pub is_correct: bool,
}

impl MarkedWord {
    pub fn new(word: impl Into<String>, is_correct: bool) -> Self {
        Self {
            word: word.into(),
            is_correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Percentage of reference words found in the spoken text, in [0, 100].
    pub accuracy: u8,
    pub marked_reference_words: Vec<MarkedWord>,
    pub marked_spoken_words: Vec<MarkedWord>,
}

impl ComparisonResult {
    pub fn empty() -> Self {
        Self {
            accuracy: 0,
            marked_reference_words: Vec::new(),
            marked_spoken_words: Vec::new(),
        }
    }

    pub fn correct_reference_count(&self) -> usize {
        self.marked_reference_words
            .iter()
            .filter(|w| w.is_correct)
            .count()
    }
}

/// A normalized token together with the whitespace-delimited chunk of the
/// source text it was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedWord {
    pub normalized: String,
    pub original: String,
}

/// Transcript store record supplying the reference text of a practice segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub video_id: String,
    pub start_sec: f64,
    pub end_sec: f64,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// One reference/spoken pair to be graded. Missing or null texts grade as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeAttempt {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default, alias = "content")]
    pub reference: Option<String>,
    #[serde(default)]
    pub spoken: Option<String>,
}

impl PracticeAttempt {
    pub fn from_segment(segment: &Segment, spoken: Option<&str>) -> Self {
        Self {
            id: segment.id.clone(),
            video_id: Some(segment.video_id.clone()),
            reference: Some(segment.content.clone()),
            spoken: spoken.map(str::to_string),
        }
    }
}
