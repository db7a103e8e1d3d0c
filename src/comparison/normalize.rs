use crate::config::DEFAULT_STRIPPED_PUNCTUATION;
use crate::types::TokenizedWord;

/// Lowercases `text`, removes the default punctuation set and splits on
/// whitespace runs. Removed characters are not replaced by a space, so
/// `"well-known"` becomes `"wellknown"`.
pub fn normalize(text: &str) -> Vec<String> {
    normalize_with(text, DEFAULT_STRIPPED_PUNCTUATION)
}

/// Missing transcripts normalize to no tokens.
pub fn normalize_optional(text: Option<&str>) -> Vec<String> {
    normalize(text.unwrap_or_default())
}

pub fn normalize_with(text: &str, stripped_punctuation: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !stripped_punctuation.contains(*c))
        .collect();
    split_words(&cleaned).map(str::to_string).collect()
}

/// Same tokens as [`normalize_with`], each paired with the raw chunk of
/// `text` it came from.
pub fn tokenize_with(text: &str, stripped_punctuation: &str) -> Vec<TokenizedWord> {
    split_words(text)
        .filter_map(|chunk| {
            let normalized: String = chunk
                .to_lowercase()
                .chars()
                .filter(|c| !stripped_punctuation.contains(*c))
                .collect();
            if normalized.is_empty() {
                return None;
            }
            Some(TokenizedWord {
                normalized,
                original: chunk.to_string(),
            })
        })
        .collect()
}

fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_word_separator).filter(|word| !word.is_empty())
}

// Unicode White_Space minus NEL (U+0085), plus the byte order mark (U+FEFF).
fn is_word_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}
