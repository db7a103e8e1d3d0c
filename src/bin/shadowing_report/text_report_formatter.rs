use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use shadowing_scorer::{ComparisonResult, MarkedWord, PracticeReport};

/// Renders a result with missed words in brackets, e.g. `i like [to] eat`.
pub fn render_result(result: &ComparisonResult) -> String {
    format!(
        "accuracy:  {}%\nreference: {}\nspoken:    {}\n",
        result.accuracy,
        render_marked_words(&result.marked_reference_words),
        render_marked_words(&result.marked_spoken_words),
    )
}

pub fn render_report(report: &PracticeReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "shadowing report generated {} ({} case(s))",
        report.meta.generated_at, report.meta.case_count
    );
    for segment in &report.segments {
        let status = if segment.graded {
            format!("{:>3}%", segment.accuracy)
        } else {
            " n/a".to_string()
        };
        let _ = write!(out, "\n[{status}] {}", segment.id);
        if let Some(video_id) = segment.video_id.as_deref() {
            let _ = write!(out, " (video {video_id})");
        }
        if !segment.notes.is_empty() {
            let _ = write!(out, " notes: {}", segment.notes.join(", "));
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  reference: {}",
            render_marked_words(&segment.result.marked_reference_words)
        );
        let _ = writeln!(
            out,
            "  spoken:    {}",
            render_marked_words(&segment.result.marked_spoken_words)
        );
    }

    let aggregates = &report.aggregates;
    let _ = writeln!(
        out,
        "\ngraded {} of {} case(s), {} perfect",
        aggregates.counts.graded, aggregates.counts.total, aggregates.perfect_count
    );
    if let Some(accuracy) = aggregates.accuracy.as_ref() {
        let _ = writeln!(
            out,
            "accuracy mean {:.1}% p10 {:.1}% p50 {:.1}% p90 {:.1}%",
            accuracy.mean, accuracy.p10, accuracy.p50, accuracy.p90
        );
    }
    if !aggregates.most_missed_words.is_empty() {
        let missed = aggregates
            .most_missed_words
            .iter()
            .map(|m| format!("{} ({})", m.word, m.count))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "most missed: {missed}");
    }
    out
}

pub fn write_report(path: &Path, report: &PracticeReport) -> Result<(), String> {
    fs::write(path, render_report(report))
        .map_err(|err| format!("Failed to write report file '{}': {err}", path.display()))
}

fn render_marked_words(words: &[MarkedWord]) -> String {
    words
        .iter()
        .map(|w| {
            if w.is_correct {
                w.word.clone()
            } else {
                format!("[{}]", w.word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
