use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::config::ComparisonConfig;
use crate::pipeline::runtime::TextComparer;
use crate::types::{ComparisonResult, PracticeAttempt, TokenizedWord};

pub const SCHEMA_VERSION: u32 = 1;
const OUTLIER_TOP_N: usize = 20;
const MISSED_WORDS_TOP_N: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct PracticeReport {
    pub schema_version: u32,
    pub meta: Meta,
    pub segments: Vec<SegmentReport>,
    pub aggregates: AggregateReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub config: ComparisonConfig,
    pub case_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentReport {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    /// False when the reference transcript has no words to grade against.
    pub graded: bool,
    pub accuracy: u8,
    pub word_count_reference: u32,
    pub word_count_spoken: u32,
    pub correct_reference_words: u32,
    pub unmatched_spoken_words: u32,
    /// Distinct reference words not found in the spoken text, in reference order.
    pub missed_words: Vec<String>,
    pub result: ComparisonResult,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub counts: AggregateCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<AccuracyDistribution>,
    pub perfect_count: u32,
    pub by_video: BTreeMap<String, VideoAggregate>,
    pub lowest_accuracy: Vec<OutlierEntry>,
    pub most_missed_words: Vec<MissedWordCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateCounts {
    pub total: u32,
    pub graded: u32,
    pub ungraded: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccuracyDistribution {
    pub mean: f32,
    pub p10: f32,
    pub p50: f32,
    pub p90: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoAggregate {
    pub attempts: u32,
    pub mean_accuracy: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlierEntry {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    pub accuracy: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissedWordCount {
    pub word: String,
    /// Number of attempts in which the word was missed.
    pub count: u32,
}

pub fn compute_segment_report(attempt: &PracticeAttempt, comparer: &TextComparer) -> SegmentReport {
    let reference_tokens = comparer.tokenize(attempt.reference.as_deref().unwrap_or_default());
    let spoken_tokens = comparer.tokenize(attempt.spoken.as_deref().unwrap_or_default());
    let result = comparer.compare_tokens(&reference_tokens, &spoken_tokens);

    let mut notes = Vec::new();
    if reference_tokens.is_empty() {
        notes.push("empty_reference".to_string());
    }
    if spoken_tokens.is_empty() {
        notes.push("empty_spoken".to_string());
    }

    let reference_flags: Vec<bool> = result
        .marked_reference_words
        .iter()
        .map(|w| w.is_correct)
        .collect();
    let spoken_flags: Vec<bool> = result
        .marked_spoken_words
        .iter()
        .map(|w| w.is_correct)
        .collect();

    let repeats = count_repeated_matches(&spoken_tokens, &spoken_flags);
    if repeats > 0 {
        notes.push(format!("repeated_reference_words={repeats}"));
    }
    let matched_reference = first_occurrence_order(&reference_tokens, &reference_flags);
    let matched_spoken = first_occurrence_order(&spoken_tokens, &spoken_flags);
    if matched_reference != matched_spoken {
        notes.push("out_of_order_match".to_string());
    }

    let missed_words = first_occurrence_order(
        &reference_tokens,
        &reference_flags.iter().map(|ok| !ok).collect::<Vec<_>>(),
    );

    SegmentReport {
        id: attempt.id.clone(),
        video_id: attempt.video_id.clone(),
        graded: !reference_tokens.is_empty(),
        accuracy: result.accuracy,
        word_count_reference: saturating_count(reference_tokens.len()),
        word_count_spoken: saturating_count(spoken_tokens.len()),
        correct_reference_words: saturating_count(result.correct_reference_count()),
        unmatched_spoken_words: saturating_count(spoken_flags.iter().filter(|ok| !**ok).count()),
        missed_words,
        result,
        notes,
    }
}

pub fn aggregate_reports(segments: &[SegmentReport]) -> AggregateReport {
    let graded: Vec<&SegmentReport> = segments.iter().filter(|s| s.graded).collect();
    let mut accuracies: Vec<u8> = graded.iter().map(|s| s.accuracy).collect();
    accuracies.sort_unstable();

    AggregateReport {
        counts: AggregateCounts {
            total: saturating_count(segments.len()),
            graded: saturating_count(graded.len()),
            ungraded: saturating_count(segments.len().saturating_sub(graded.len())),
        },
        accuracy: accuracy_distribution(&accuracies),
        perfect_count: saturating_count(graded.iter().filter(|s| s.accuracy == 100).count()),
        by_video: aggregate_by_video(&graded),
        lowest_accuracy: lowest_accuracy(&graded, OUTLIER_TOP_N),
        most_missed_words: most_missed_words(&graded, MISSED_WORDS_TOP_N),
    }
}

pub fn build_report(
    segments: Vec<SegmentReport>,
    config: ComparisonConfig,
    generated_at: String,
) -> PracticeReport {
    let aggregates = aggregate_reports(&segments);
    PracticeReport {
        schema_version: SCHEMA_VERSION,
        meta: Meta {
            generated_at,
            config,
            case_count: segments.len(),
        },
        segments,
        aggregates,
    }
}

fn count_repeated_matches(tokens: &[TokenizedWord], flags: &[bool]) -> usize {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .zip(flags)
        .filter(|(_, ok)| **ok)
        .filter(|(token, _)| !seen.insert(token.normalized.to_lowercase()))
        .count()
}

fn first_occurrence_order(tokens: &[TokenizedWord], selected: &[bool]) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .zip(selected)
        .filter(|(_, keep)| **keep)
        .map(|(token, _)| token.normalized.to_lowercase())
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

fn aggregate_by_video(segments: &[&SegmentReport]) -> BTreeMap<String, VideoAggregate> {
    let mut grouped: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for segment in segments {
        if let Some(video_id) = segment.video_id.as_ref() {
            grouped
                .entry(video_id.clone())
                .or_default()
                .push(segment.accuracy as f64);
        }
    }
    grouped
        .into_iter()
        .map(|(video_id, values)| {
            let aggregate = VideoAggregate {
                attempts: saturating_count(values.len()),
                mean_accuracy: mean(&values) as f32,
            };
            (video_id, aggregate)
        })
        .collect()
}

fn lowest_accuracy(segments: &[&SegmentReport], top_n: usize) -> Vec<OutlierEntry> {
    let mut entries: Vec<OutlierEntry> = segments
        .iter()
        .filter(|segment| segment.accuracy < 100)
        .map(|segment| OutlierEntry {
            id: segment.id.clone(),
            video_id: segment.video_id.clone(),
            accuracy: segment.accuracy,
        })
        .collect();
    entries.sort_by(|a, b| a.accuracy.cmp(&b.accuracy).then_with(|| a.id.cmp(&b.id)));
    entries.truncate(top_n);
    entries
}

fn most_missed_words(segments: &[&SegmentReport], top_n: usize) -> Vec<MissedWordCount> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for segment in segments {
        for word in &segment.missed_words {
            *counts.entry(word.as_str()).or_default() += 1;
        }
    }
    let mut ranked: Vec<MissedWordCount> = counts
        .into_iter()
        .map(|(word, count)| MissedWordCount {
            word: word.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(top_n);
    ranked
}

/// Accuracies are whole percentages, so every statistic is finite.
/// `None` only when nothing was graded.
fn accuracy_distribution(sorted_accuracies: &[u8]) -> Option<AccuracyDistribution> {
    if sorted_accuracies.is_empty() {
        return None;
    }
    let values: Vec<f64> = sorted_accuracies.iter().map(|&a| f64::from(a)).collect();
    Some(AccuracyDistribution {
        mean: mean(&values) as f32,
        p10: interpolated_percentile(&values, 0.1) as f32,
        p50: interpolated_percentile(&values, 0.5) as f32,
        p90: interpolated_percentile(&values, 0.9) as f32,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len().max(1) as f64
}

/// Linear interpolation between the two closest ranks of an ascending slice.
fn interpolated_percentile(ascending: &[f64], quantile: f64) -> f64 {
    let Some((&lowest, rest)) = ascending.split_first() else {
        return 0.0;
    };
    if rest.is_empty() {
        return lowest;
    }
    let position = quantile.clamp(0.0, 1.0) * rest.len() as f64;
    let below = position.floor() as usize;
    let fraction = position - below as f64;
    match ascending.get(below + 1) {
        Some(&above) if fraction > 0.0 => {
            ascending[below] + (above - ascending[below]) * fraction
        }
        _ => ascending[below],
    }
}

fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
