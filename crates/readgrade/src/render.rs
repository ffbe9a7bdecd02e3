//! Terminal rendering of scores and highlighted text.

use owo_colors::{OwoColorize, Stream};
use readgrade_core::{GradeConfig, HighlightReport, ScoreResult, Verdict};

use crate::ColorChoice;

impl ColorChoice {
    /// Whether stdout should receive ANSI color.
    ///
    /// `auto` uses the detection behind owo-colors' `if_supports_color`.
    pub fn stdout_enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => supports_color::on_cached(supports_color::Stream::Stdout).is_some(),
        }
    }
}

/// Paint a color swatch for a score, or nothing without color.
pub fn swatch(score: &ScoreResult, color: bool) -> String {
    if !color {
        return String::new();
    }
    let (r, g, b) = score.color().rgb();
    format!("{} ", "  ".on_truecolor(r, g, b))
}

/// Reproduce the source text with highlighted units painted.
///
/// With color, each highlighted unit gets its tint as a background. Without
/// color, each highlighted unit is followed by its grade in brackets so the
/// output still shows where the hard parts are.
pub fn paint_units(source: &str, report: &HighlightReport, color: bool) -> String {
    let mut out = String::with_capacity(source.len() + report.units.len() * 16);
    let mut cursor = 0;

    for unit in &report.units {
        out.push_str(&source[cursor..unit.start]);
        if unit.highlighted {
            if color {
                let (r, g, b) = unit.score.color().rgb();
                out.push_str(&unit.text.black().on_truecolor(r, g, b).to_string());
            } else {
                out.push_str(&format!("{} [{}]", unit.text, unit.score.grade));
            }
        } else {
            out.push_str(&unit.text);
        }
        cursor = unit.end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Print a verdict's status line: red over max, yellow over target.
pub fn print_status(message: &str, verdict: Verdict) {
    match verdict {
        Verdict::OverMax => println!("{}", message.if_supports_color(Stream::Stdout, |t| t.red())),
        _ => println!("{}", message.if_supports_color(Stream::Stdout, |t| t.yellow())),
    }
}

/// "target 7, max 11" style summary of the grade settings.
pub fn describe_grades(grades: &GradeConfig) -> String {
    match grades.max_grade() {
        Some(max) => format!("target {}, max {max}", grades.target_grade()),
        None => format!("target {}", grades.target_grade()),
    }
}
