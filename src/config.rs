use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ComparisonError;

/// Characters removed from transcripts before splitting into words.
pub const DEFAULT_STRIPPED_PUNCTUATION: &str = ".,/#!$%^&*;:{}=-_`~()";

/// Which text a `MarkedWord` carries for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordDisplay {
    /// The lowercased, punctuation-stripped token.
    #[default]
    Normalized,
    /// The whitespace-delimited chunk as it appeared in the source text.
    Original,
}

/// How spoken words are highlighted. Reference words, and therefore the
/// accuracy, are always graded by membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkingStrategy {
    /// A word is correct if it appears anywhere in the other text.
    #[default]
    Membership,
    /// A spoken word is correct only if the reference has the same word at the same index.
    Positional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub stripped_punctuation: String,
    pub display: WordDisplay,
    pub marking: MarkingStrategy,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            stripped_punctuation: DEFAULT_STRIPPED_PUNCTUATION.to_string(),
            display: WordDisplay::Normalized,
            marking: MarkingStrategy::Membership,
        }
    }
}

impl ComparisonConfig {
    pub fn load(path: &Path) -> Result<Self, ComparisonError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ComparisonError::io("read comparison config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| ComparisonError::json("parse comparison config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ComparisonError> {
        if let Some(c) = self.stripped_punctuation.chars().find(|c| c.is_whitespace()) {
            return Err(ComparisonError::invalid_input(format!(
                "stripped_punctuation must not contain whitespace (found {c:?})"
            )));
        }
        if self.stripped_punctuation.chars().any(char::is_alphanumeric) {
            return Err(ComparisonError::invalid_input(
                "stripped_punctuation must not contain letters or digits",
            ));
        }
        if self.stripped_punctuation.is_empty() {
            tracing::warn!("stripped_punctuation is empty; punctuation will be part of words");
        }
        Ok(())
    }
}
