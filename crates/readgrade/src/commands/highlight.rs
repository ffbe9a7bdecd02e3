//! Highlight command: print text with each unit colored by its own grade.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, instrument};

use readgrade_core::config::Config;
use readgrade_core::{GradeConfig, HighlightBy, HighlightReport, highlight};

use super::{GradeArgs, display_name, load_text};
use crate::render;

/// Arguments for the `highlight` subcommand.
#[derive(Args, Debug)]
pub struct HighlightArgs {
    /// File to highlight (`-` for standard input).
    pub file: Utf8PathBuf,

    /// Grade settings and input format
    #[command(flatten)]
    pub grades: GradeArgs,

    /// Unit to score and color (default from config, else sentence)
    #[arg(long, value_enum)]
    pub by: Option<HighlightBy>,

    /// Always highlight, even when the text is on target
    #[arg(long, conflicts_with = "no_highlight")]
    pub highlight: bool,

    /// Never highlight; print the text and its grade only
    #[arg(long)]
    pub no_highlight: bool,
}

impl HighlightArgs {
    /// The user's explicit highlighting preference, if any.
    pub const fn preference(&self) -> Option<bool> {
        match (self.highlight, self.no_highlight) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct HighlightOutput<'a> {
    file: &'a str,
    #[serde(flatten)]
    report: &'a HighlightReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    grades: &'a GradeConfig,
}

/// Highlight a file by sentence or paragraph.
#[instrument(name = "cmd_highlight", skip_all, fields(file = %args.file))]
pub fn cmd_highlight(
    args: HighlightArgs,
    global_json: bool,
    color: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let by = args.by.unwrap_or(config.highlight_by);
    debug!(file = %args.file, %by, preference = ?args.preference(), "executing highlight command");

    let grades = args.grades.resolve(config)?;
    let text = load_text(&args.file, &args.grades, max_input_bytes)?;
    let report = highlight(&text, &grades, by, args.preference());

    if global_json {
        let output = HighlightOutput {
            file: display_name(&args.file),
            report: &report,
            message: report.verdict.status_message(),
            grades: &grades,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", render::paint_units(&text, &report, color));
    println!();
    println!(
        "{}Grade {} ({})",
        render::swatch(&report.score, color),
        report.score.grade.if_supports_color(Stream::Stdout, |g| g.bold()),
        render::describe_grades(&grades)
    );
    if let Some(message) = report.verdict.status_message() {
        render::print_status(message, report.verdict);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(highlight: bool, no_highlight: bool) -> HighlightArgs {
        HighlightArgs {
            file: Utf8PathBuf::from("-"),
            grades: GradeArgs::default(),
            by: None,
            highlight,
            no_highlight,
        }
    }

    #[test]
    fn preference_from_flags() {
        assert_eq!(args(false, false).preference(), None);
        assert_eq!(args(true, false).preference(), Some(true));
        assert_eq!(args(false, true).preference(), Some(false));
    }

    #[test]
    fn json_output_lists_units() {
        let grades = GradeConfig::default();
        let text = "Short one. Another short one.";
        let report = highlight(text, &grades, HighlightBy::Sentence, Some(true));
        let output = HighlightOutput {
            file: "a.txt",
            report: &report,
            message: None,
            grades: &grades,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["units"].as_array().unwrap().len(), 2);
        assert_eq!(json["units"][0]["kind"], "sentence");
        assert_eq!(json["units"][0]["start"], 0);
        assert_eq!(json["highlight_by"], "sentence");
        assert!(json["score"]["grade"].as_f64().is_some());
    }
}
