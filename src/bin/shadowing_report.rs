use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use shadowing_scorer::{
    build_report, compute_segment_report, ComparisonConfig, MarkingStrategy, PracticeAttempt,
    SegmentReport, TextComparer, TextComparerBuilder, WordDisplay,
};
use tracing_subscriber::EnvFilter;

#[path = "shadowing_report/json_report_formatter.rs"]
mod json_report_formatter;
#[path = "shadowing_report/text_report_formatter.rs"]
mod text_report_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DisplayChoice {
    Normalized,
    Original,
}

impl DisplayChoice {
    fn word_display(self) -> WordDisplay {
        match self {
            Self::Normalized => WordDisplay::Normalized,
            Self::Original => WordDisplay::Original,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MarkingChoice {
    Membership,
    Positional,
}

impl MarkingChoice {
    fn marking_strategy(self) -> MarkingStrategy {
        match self {
            Self::Membership => MarkingStrategy::Membership,
            Self::Positional => MarkingStrategy::Positional,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shadowing_report")]
#[command(about = "Grade spoken transcripts against reference transcripts")]
struct Args {
    /// Reference transcript to grade a single attempt against.
    #[arg(
        long,
        env = "SHADOWING_REPORT_REFERENCE",
        requires = "spoken",
        conflicts_with = "cases_file"
    )]
    reference: Option<String>,
    /// Transcribed speech for a single attempt.
    #[arg(long, env = "SHADOWING_REPORT_SPOKEN", requires = "reference")]
    spoken: Option<String>,
    /// JSON array or JSON-lines file of practice attempts.
    #[arg(long, env = "SHADOWING_REPORT_CASES_FILE")]
    cases_file: Option<PathBuf>,
    #[arg(long, env = "SHADOWING_REPORT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "SHADOWING_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "SHADOWING_REPORT_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "SHADOWING_REPORT_OFFSET", default_value_t = 0)]
    offset: usize,
    #[arg(
        long,
        env = "SHADOWING_REPORT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Json
    )]
    output_format: OutputFormat,
    #[arg(long, env = "SHADOWING_REPORT_DISPLAY", value_enum)]
    display: Option<DisplayChoice>,
    #[arg(long, env = "SHADOWING_REPORT_MARKING", value_enum)]
    marking: Option<MarkingChoice>,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let working_dir = std::env::current_dir()
        .map_err(|err| format!("Failed to resolve working directory: {err}"))?;

    let config = load_config(&args, &working_dir)?;
    let comparer = TextComparerBuilder::new(config.clone())
        .build()
        .map_err(|err| format!("Failed to build TextComparer: {err}"))?;

    if let (Some(reference), Some(spoken)) = (args.reference.as_deref(), args.spoken.as_deref()) {
        return print_single(&comparer, reference, spoken, args.output_format);
    }

    let cases_file = args.cases_file.as_ref().ok_or_else(|| {
        "Either --cases-file or both --reference and --spoken are required.".to_string()
    })?;
    let cases_path = existing_input(&working_dir, cases_file, "--cases-file")?;
    let mut cases = load_cases(&cases_path)?;

    if args.offset > 0 {
        cases = cases.into_iter().skip(args.offset).collect();
    }
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err("No cases selected after applying offset/limit.".to_string());
    }

    let started = Instant::now();
    let segments = grade_cases(&comparer, &cases);
    let elapsed = started.elapsed();
    println!(
        "graded {} case(s) in {:.2}s ({:.3}ms per case)",
        segments.len(),
        elapsed.as_secs_f64(),
        elapsed.as_secs_f64() * 1000.0 / segments.len() as f64
    );

    let report = build_report(segments, config, Utc::now().to_rfc3339());
    let out_path = resolve_out_path(&working_dir, args.out.as_ref(), args.output_format);
    create_parent_dir(&out_path)?;
    match args.output_format {
        OutputFormat::Json => json_report_formatter::write_report(&out_path, &report)?,
        OutputFormat::Text => text_report_formatter::write_report(&out_path, &report)?,
    }
    println!("{}", out_path.display());
    Ok(())
}

fn load_config(args: &Args, working_dir: &Path) -> Result<ComparisonConfig, String> {
    let mut config = match args.config.as_ref() {
        Some(path) => {
            let path = existing_input(working_dir, path, "--config")?;
            ComparisonConfig::load(&path)
                .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?
        }
        None => ComparisonConfig::default(),
    };
    if let Some(display) = args.display {
        config.display = display.word_display();
    }
    if let Some(marking) = args.marking {
        config.marking = marking.marking_strategy();
    }
    Ok(config)
}

fn print_single(
    comparer: &TextComparer,
    reference: &str,
    spoken: &str,
    output_format: OutputFormat,
) -> Result<(), String> {
    let result = comparer.compare(reference, spoken);
    match output_format {
        OutputFormat::Json => println!("{}", json_report_formatter::to_pretty_string(&result)?),
        OutputFormat::Text => print!("{}", text_report_formatter::render_result(&result)),
    }
    Ok(())
}

fn grade_cases(comparer: &TextComparer, cases: &[PracticeAttempt]) -> Vec<SegmentReport> {
    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("starting...");

    let mut segments = Vec::with_capacity(cases.len());
    for case in cases {
        progress.set_message(case.id.clone());
        segments.push(compute_segment_report(case, comparer));
        progress.inc(1);
    }
    progress.finish_with_message("grading pass complete");
    segments
}

fn load_cases(path: &Path) -> Result<Vec<PracticeAttempt>, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read cases file '{}': {err}", path.display()))?;

    if contents.trim_start().starts_with('[') {
        return serde_json::from_str(&contents)
            .map_err(|err| format!("Failed to parse cases file '{}': {err}", path.display()));
    }

    let mut cases = Vec::new();
    for (idx, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let case: PracticeAttempt = serde_json::from_str(line).map_err(|err| {
            format!(
                "Failed to parse case on line {} of '{}': {err}",
                idx + 1,
                path.display()
            )
        })?;
        cases.push(case);
    }
    Ok(cases)
}

fn resolve_out_path(working_dir: &Path, out: Option<&PathBuf>, format: OutputFormat) -> PathBuf {
    if let Some(path) = out {
        return working_dir.join(path);
    }

    let run_id = Utc::now().format("%Y%m%dT%H%M%SZ");
    working_dir
        .join("target")
        .join("shadowing_reports")
        .join(format!("shadowing-report-{run_id}.{}", format.extension()))
}

/// Joins a relative `path` onto the working directory and checks that it exists.
fn existing_input(working_dir: &Path, path: &Path, flag: &str) -> Result<PathBuf, String> {
    let resolved = working_dir.join(path);
    if resolved.exists() {
        Ok(resolved)
    } else {
        Err(format!("{flag} points at '{}', which does not exist", resolved.display()))
    }
}

fn create_parent_dir(path: &Path) -> Result<(), String> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|err| format!("Failed to create output directory '{}': {err}", parent.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_input_resolves_relative_and_rejects_missing() {
        let dir = std::env::temp_dir().join(format!("shadowing-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("cases.jsonl"), "").unwrap();

        let found = existing_input(&dir, Path::new("cases.jsonl"), "--cases-file").unwrap();
        assert_eq!(found, dir.join("cases.jsonl"));

        let err = existing_input(&dir, Path::new("absent.json"), "--config").unwrap_err();
        assert!(err.starts_with("--config points at"), "{err}");
    }

    #[test]
    fn json_report_lands_in_created_directory() {
        let dir = std::env::temp_dir().join(format!("shadowing-cli-out-{}", std::process::id()));
        let out = dir.join("nested").join("report.json");
        create_parent_dir(&out).unwrap();
        json_report_formatter::write_report(&out, &serde_json::json!({ "accuracy": 60 })).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.ends_with("}\n"));
        assert!(create_parent_dir(Path::new("report.json")).is_ok());
    }
}
