//! Score command: blended grade level for a whole text.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, instrument};

use readgrade_core::config::Config;
use readgrade_core::highlight::validation_message;
use readgrade_core::stats::{self, ReadabilityScores};
use readgrade_core::{GradeConfig, ScoreResult, Verdict, score};

use super::{GradeArgs, display_name, load_text};
use crate::render;

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File to score (`-` for standard input).
    pub file: Utf8PathBuf,

    /// Grade settings and input format
    #[command(flatten)]
    pub grades: GradeArgs,

    /// Also print each formula's grade
    #[arg(long)]
    pub breakdown: bool,
}

/// JSON output for `score`.
#[derive(Debug, Serialize)]
pub struct ScoreReport {
    /// Input label.
    pub file: String,
    /// Blended grade and hue.
    #[serde(flatten)]
    pub result: ScoreResult,
    /// CSS color for the hue.
    pub color: String,
    /// How the grade compares with the settings.
    pub verdict: Verdict,
    /// Status line, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    /// Grade settings in effect.
    pub grades: GradeConfig,
    /// Per-formula grades.
    pub formulas: ReadabilityScores,
}

impl ScoreReport {
    /// Score `text` under `grades`.
    pub fn build(file: &str, text: &str, grades: GradeConfig) -> Self {
        let result = score(text, &grades);
        let verdict = Verdict::classify(result.grade, &grades);
        Self {
            file: file.to_string(),
            color: result.color().css(),
            result,
            verdict,
            message: verdict.status_message(),
            grades,
            formulas: stats::readability_scores(text),
        }
    }
}

/// Score a file and report its grade, color, and verdict.
///
/// Fails when the grade exceeds the maximum.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    color: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, grades = ?args.grades, "executing score command");

    let grades = args.grades.resolve(config)?;
    let text = load_text(&args.file, &args.grades, max_input_bytes)?;
    let report = ScoreReport::build(display_name(&args.file), &text, grades);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, args.breakdown, color);
    }

    if let Some(message) = validation_message(report.result.grade, &grades) {
        bail!("{}: {message}", report.file);
    }
    Ok(())
}

fn print_report(report: &ScoreReport, breakdown: bool, color: bool) {
    println!(
        "{}: grade {} ({})",
        report.file.if_supports_color(Stream::Stdout, |t| t.bold()),
        report.result.grade,
        render::describe_grades(&report.grades)
    );
    println!(
        "{}{}: {}",
        render::swatch(&report.result, color),
        "Color".if_supports_color(Stream::Stdout, |t| t.dimmed()),
        report.color
    );

    if breakdown {
        let f = &report.formulas;
        for (name, value) in [
            ("SMOG", f.smog),
            ("Dale-Chall", f.dale_chall),
            ("ARI", f.ari),
            ("Coleman-Liau", f.coleman_liau),
            ("Flesch-Kincaid", f.flesch_kincaid),
            ("Gunning Fog", f.gunning_fog),
        ] {
            let label = format!("{name}:");
            println!(
                "  {:<15} {value:.2}",
                label.if_supports_color(Stream::Stdout, |t| t.dimmed())
            );
        }
    }

    if let Some(message) = report.message {
        render::print_status(message, report.verdict);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DENSE: &str = "The implementation of the comprehensive organizational restructuring \
                         initiative necessitated the establishment of interdepartmental \
                         communication protocols.";

    #[test]
    fn report_for_simple_text() {
        let grades = GradeConfig::new(Some(7.0), Some(11.0));
        let report = ScoreReport::build("a.txt", "The cat sat on the mat.", grades);
        assert_eq!(report.verdict, Verdict::Ok);
        assert!(report.message.is_none());
        assert_eq!(report.color, "hsl(120, 93%, 85%)");
    }

    #[test]
    fn report_for_dense_text() {
        let grades = GradeConfig::new(Some(7.0), Some(11.0));
        let report = ScoreReport::build("a.txt", DENSE, grades);
        assert_eq!(report.verdict, Verdict::OverMax);
        assert_eq!(
            report.message,
            Some("Error: text exceeds maximum readability.")
        );
        assert_eq!(report.result.hue, 0.0);
    }

    #[test]
    fn report_json_shape() {
        let report = ScoreReport::build("a.txt", DENSE, GradeConfig::default());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["grade"].as_f64().unwrap() > 11.0);
        assert_eq!(json["verdict"], "ok");
        assert!(json.get("message").is_none());
        assert_eq!(json["grades"]["target_grade"], 7.0);
        assert!(json["formulas"]["smog"].as_f64().is_some());
    }
}
