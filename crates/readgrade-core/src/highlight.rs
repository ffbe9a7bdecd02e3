//! Sentence and paragraph highlighting, plus the pass/warn/fail verdict.
//!
//! [`highlight`] scores a document as a whole and then each of its units.
//! Units carry byte offsets into the source, so a renderer can paint them in
//! place without re-segmenting.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::gradient::ColorMode;
use crate::scorer::{self, GradeConfig, ScoreResult};
use crate::text::{self, Span};

/// Unit of text to score and highlight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum HighlightBy {
    /// One unit per sentence.
    #[default]
    Sentence,
    /// One unit per paragraph.
    Paragraph,
}

impl HighlightBy {
    /// Returns the unit as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sentence => "sentence",
            Self::Paragraph => "paragraph",
        }
    }

    fn spans(self, text: &str) -> Vec<Span> {
        match self {
            Self::Sentence => text::sentence_spans(text),
            Self::Paragraph => text::paragraph_spans(text),
        }
    }
}

impl std::fmt::Display for HighlightBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a score compares with the configured grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Within target (or no explicit target and within max).
    Ok,
    /// Above an explicitly requested target.
    OverTarget,
    /// Above the maximum grade.
    OverMax,
}

impl Verdict {
    /// Classify a grade. Exceeding the maximum takes precedence; the target
    /// only counts when it was requested explicitly.
    pub fn classify(grade: f64, config: &GradeConfig) -> Self {
        if config.max_grade().is_some_and(|max| grade > max) {
            Self::OverMax
        } else if config.target_requested() && grade > config.target_grade() {
            Self::OverTarget
        } else {
            Self::Ok
        }
    }

    /// The status line shown under the score, if any.
    pub const fn status_message(&self) -> Option<&'static str> {
        match self {
            Self::Ok => None,
            Self::OverTarget => Some("Warning: text exceeds target readability."),
            Self::OverMax => Some("Error: text exceeds maximum readability."),
        }
    }

    /// Whether the text fails validation.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::OverMax)
    }
}

/// Validation message for a grade above the maximum.
pub fn validation_message(grade: f64, config: &GradeConfig) -> Option<String> {
    let max = config.max_grade()?;
    (grade > max).then(|| format!("Readability grade must be less than or equal to {max}."))
}

/// A scored sentence or paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct HighlightUnit {
    /// Whether this is a sentence or a paragraph.
    pub kind: HighlightBy,
    /// Byte offset where the unit starts.
    pub start: usize,
    /// Byte offset where the unit ends (exclusive).
    pub end: usize,
    /// The unit's text.
    pub text: String,
    /// The unit's own score.
    pub score: ScoreResult,
    /// Whether a renderer should paint this unit.
    pub highlighted: bool,
}

impl HighlightUnit {
    /// The unit's byte range in the source text.
    pub const fn span(&self) -> Span {
        self.start..self.end
    }
}

/// The result of scoring and segmenting a document.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct HighlightReport {
    /// Whole-document score.
    pub score: ScoreResult,
    /// Verdict for the whole document.
    pub verdict: Verdict,
    /// Unit used for segmentation.
    pub highlight_by: HighlightBy,
    /// Whether highlighting is active.
    pub highlighting: bool,
    /// Scored units in document order.
    pub units: Vec<HighlightUnit>,
}

impl HighlightReport {
    /// Units a renderer should paint.
    pub fn highlighted_units(&self) -> impl Iterator<Item = &HighlightUnit> {
        self.units.iter().filter(|u| u.highlighted)
    }
}

/// Decide whether highlighting is on.
///
/// An explicit preference always wins. Without one, highlighting turns on
/// when the document grade is above target.
pub fn highlighting_enabled(grade: f64, config: &GradeConfig, preference: Option<bool>) -> bool {
    preference.unwrap_or(grade > config.target_grade())
}

/// Score a document and each of its units.
#[tracing::instrument(skip(text, config), fields(text_len = text.len()))]
pub fn highlight(
    text: &str,
    config: &GradeConfig,
    by: HighlightBy,
    preference: Option<bool>,
) -> HighlightReport {
    let score = scorer::score(text, config);
    let verdict = Verdict::classify(score.grade, config);
    let highlighting = highlighting_enabled(score.grade, config, preference);

    let units: Vec<HighlightUnit> = by
        .spans(text)
        .into_iter()
        .map(|span| {
            let unit_text = &text[span.clone()];
            let unit_score = scorer::score(unit_text, config);
            let highlighted = highlighting
                && match config.color_mode() {
                    ColorMode::Classic => true,
                    ColorMode::Clear => unit_score.grade > config.target_grade(),
                };
            HighlightUnit {
                kind: by,
                start: span.start,
                end: span.end,
                text: unit_text.to_string(),
                score: unit_score,
                highlighted,
            }
        })
        .collect();

    tracing::debug!(
        units = units.len(),
        highlighting,
        grade = score.grade,
        "highlighted text"
    );

    HighlightReport {
        score,
        verdict,
        highlight_by: by,
        highlighting,
        units,
    }
}
