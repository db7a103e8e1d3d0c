use std::collections::HashSet;

use crate::types::MarkedWord;

/// Marks each source word with whether it occurs anywhere in `reference`,
/// ignoring case. Order and duplicates in either sequence do not matter.
pub fn mark_words<S, R>(source: &[S], reference: &[R]) -> Vec<MarkedWord>
where
    S: AsRef<str>,
    R: AsRef<str>,
{
    attach_flags(source, membership_flags(source, reference))
}

/// Marks each source word with whether `reference` has the same word at the
/// same index, ignoring case.
pub fn mark_words_positional<S, R>(source: &[S], reference: &[R]) -> Vec<MarkedWord>
where
    S: AsRef<str>,
    R: AsRef<str>,
{
    attach_flags(source, positional_flags(source, reference))
}

pub fn membership_flags<S, R>(source: &[S], reference: &[R]) -> Vec<bool>
where
    S: AsRef<str>,
    R: AsRef<str>,
{
    let present: HashSet<String> = reference
        .iter()
        .map(|word| word.as_ref().to_lowercase())
        .collect();
    source
        .iter()
        .map(|word| present.contains(&word.as_ref().to_lowercase()))
        .collect()
}

pub fn positional_flags<S, R>(source: &[S], reference: &[R]) -> Vec<bool>
where
    S: AsRef<str>,
    R: AsRef<str>,
{
    source
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            reference
                .get(idx)
                .is_some_and(|other| other.as_ref().to_lowercase() == word.as_ref().to_lowercase())
        })
        .collect()
}

fn attach_flags<S: AsRef<str>>(source: &[S], flags: Vec<bool>) -> Vec<MarkedWord> {
    debug_assert_eq!(source.len(), flags.len());
    source
        .iter()
        .zip(flags)
        .map(|(word, is_correct)| MarkedWord::new(word.as_ref(), is_correct))
        .collect()
}
