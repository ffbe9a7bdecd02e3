//! Grade scoring: blend the formulas, round, and map to a hue.
//!
//! [`GradeConfig`] holds the target and maximum grade and the bounds derived
//! from them. [`score`] turns a text into a [`ScoreResult`] under that
//! configuration. The same function scores whole documents and individual
//! sentences or paragraphs, so a unit's grade never depends on where it came
//! from.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::gradient::{ColorMode, HighlightColor, HueGradient};
use crate::stats::{self, ReadabilityScores};

/// Weight of SMOG in the blended grade.
pub const SMOG_WEIGHT: f64 = 3.0 / 8.0;
/// Weight of each of the other five formulas.
pub const OTHER_WEIGHT: f64 = 1.0 / 8.0;

/// Grade levels and color mode used to score and color text.
///
/// Construct with [`GradeConfig::new`]; the easy and hard bounds are always
/// derived from the target and maximum, never set independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct GradeConfig {
    target_grade: f64,
    target_requested: bool,
    max_grade: Option<f64>,
    too_easy_grade: f64,
    too_hard_grade: f64,
    color_mode: ColorMode,
}

impl GradeConfig {
    /// Target grade when neither a target nor a maximum is given.
    pub const DEFAULT_TARGET_GRADE: f64 = 7.0;
    /// Grades below target at which text reads as too easy.
    pub const EASY_SPREAD: f64 = 2.0;
    /// Grades above target at which text reads as too hard.
    pub const HARD_SPREAD: f64 = 4.0;

    /// Resolve grade bounds from an optional requested target and maximum.
    ///
    /// The target falls back to the maximum, then to
    /// [`DEFAULT_TARGET_GRADE`](Self::DEFAULT_TARGET_GRADE). Zero, negative,
    /// and non-finite values count as unset. When a maximum is present the
    /// too-hard grade is pulled down to it, but never below the target.
    pub fn new(requested_target: Option<f64>, max_grade: Option<f64>) -> Self {
        let requested_target = requested_target.filter(|g| is_grade(*g));
        let max_grade = max_grade.filter(|g| is_grade(*g));

        let target_grade = requested_target
            .or(max_grade)
            .unwrap_or(Self::DEFAULT_TARGET_GRADE);
        let too_easy_grade = (target_grade - Self::EASY_SPREAD).max(0.0);
        let ceiling = target_grade + Self::HARD_SPREAD;
        let too_hard_grade = max_grade.map_or(ceiling, |max| max.clamp(target_grade, ceiling));

        Self {
            target_grade,
            target_requested: requested_target.is_some(),
            max_grade,
            too_easy_grade,
            too_hard_grade,
            color_mode: ColorMode::default(),
        }
    }

    /// Use a different color mode.
    #[must_use]
    pub const fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    /// The effective target grade.
    pub const fn target_grade(&self) -> f64 {
        self.target_grade
    }

    /// Whether the target was given explicitly rather than defaulted.
    pub const fn target_requested(&self) -> bool {
        self.target_requested
    }

    /// The hard limit, if any.
    pub const fn max_grade(&self) -> Option<f64> {
        self.max_grade
    }

    /// Grade at or below which text is too easy.
    pub const fn too_easy_grade(&self) -> f64 {
        self.too_easy_grade
    }

    /// Grade at or above which text is too hard.
    pub const fn too_hard_grade(&self) -> f64 {
        self.too_hard_grade
    }

    /// The color mode.
    pub const fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// The hue gradient for this configuration.
    pub fn gradient(&self) -> HueGradient {
        match self.color_mode {
            ColorMode::Classic => {
                HueGradient::classic(self.too_easy_grade, self.target_grade, self.too_hard_grade)
            }
            ColorMode::Clear => {
                HueGradient::clear(self.too_easy_grade, self.target_grade, self.too_hard_grade)
            }
        }
    }

    /// Hue reported for text with nothing to score.
    pub fn too_easy_hue(&self) -> f64 {
        self.gradient().easiest_hue()
    }
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn is_grade(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// The outcome of scoring a text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreResult {
    /// Blended grade level, rounded to two decimals.
    pub grade: f64,
    /// Hue in degrees, 120 (easy) down to 0 (too hard).
    pub hue: f64,
}

impl ScoreResult {
    /// The highlight tint for this result.
    pub const fn color(&self) -> HighlightColor {
        HighlightColor::from_hue(self.hue)
    }
}

/// Blend the six formulas into one grade.
pub fn blend(scores: &ReadabilityScores) -> f64 {
    SMOG_WEIGHT * scores.smog
        + OTHER_WEIGHT
            * (scores.dale_chall
                + scores.ari
                + scores.coleman_liau
                + scores.flesch_kincaid
                + scores.gunning_fog)
}

/// Round to two decimals. Halves round up, including values such as
/// `1.005` whose binary form sits just below the half.
pub fn round_to_2_decimals(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}

/// Score a text under a grade configuration.
///
/// Empty or whitespace-only text, and text without letters, scores grade 0
/// with the too-easy hue.
#[tracing::instrument(skip(text, config), fields(text_len = text.len()))]
pub fn score(text: &str, config: &GradeConfig) -> ScoreResult {
    let empty = ScoreResult {
        grade: 0.0,
        hue: config.too_easy_hue(),
    };
    if text.trim().is_empty() {
        return empty;
    }

    let scores = stats::readability_scores(text);
    if scores.letter_count == 0 {
        return empty;
    }

    let grade = round_to_2_decimals(blend(&scores));
    let hue = config.gradient().hue_at(grade);
    tracing::debug!(grade, hue, "scored text");
    ScoreResult { grade, hue }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::{HUE_RED, HUE_YELLOW};

    const SIMPLE: &str = "The cat sat on the mat. The dog ran to the park. We had fun in the sun.";

    const DENSE: &str = "The implementation of the comprehensive organizational restructuring \
                         initiative necessitated the establishment of interdepartmental \
                         communication protocols that facilitated the dissemination of \
                         procedural documentation.";

    #[test]
    fn defaults_to_grade_seven() {
        let c = GradeConfig::default();
        assert_eq!(c.target_grade(), 7.0);
        assert!(!c.target_requested());
        assert_eq!(c.max_grade(), None);
        assert_eq!(c.too_easy_grade(), 5.0);
        assert_eq!(c.too_hard_grade(), 11.0);
        assert_eq!(c.color_mode(), ColorMode::Classic);
    }

    #[test]
    fn target_falls_back_to_max() {
        let c = GradeConfig::new(None, Some(9.0));
        assert_eq!(c.target_grade(), 9.0);
        assert!(!c.target_requested());
        assert_eq!(c.too_hard_grade(), 9.0);
    }

    #[test]
    fn requested_target_wins() {
        let c = GradeConfig::new(Some(6.0), Some(9.0));
        assert_eq!(c.target_grade(), 6.0);
        assert!(c.target_requested());
        assert_eq!(c.too_easy_grade(), 4.0);
        assert_eq!(c.too_hard_grade(), 9.0);
    }

    #[test]
    fn max_beyond_spread_keeps_full_range() {
        let c = GradeConfig::new(Some(7.0), Some(14.0));
        assert_eq!(c.too_hard_grade(), 11.0);
    }

    #[test]
    fn bounds_stay_ordered() {
        for (target, max) in [
            (Some(1.0), None),
            (Some(7.0), Some(3.0)),
            (None, Some(0.5)),
            (Some(12.0), Some(12.0)),
        ] {
            let c = GradeConfig::new(target, max);
            assert!(c.too_easy_grade() >= 0.0);
            assert!(c.too_easy_grade() <= c.target_grade());
            assert!(c.target_grade() <= c.too_hard_grade());
        }
    }

    #[test]
    fn invalid_grades_are_unset() {
        let c = GradeConfig::new(Some(0.0), Some(f64::NAN));
        assert_eq!(c, GradeConfig::default());
        let c = GradeConfig::new(Some(-3.0), Some(f64::INFINITY));
        assert_eq!(c, GradeConfig::default());
    }

    #[test]
    fn rounding_goes_half_up() {
        assert_eq!(round_to_2_decimals(7.005), 7.01);
        assert_eq!(round_to_2_decimals(1.005), 1.01);
        assert_eq!(round_to_2_decimals(7.004), 7.0);
        assert_eq!(round_to_2_decimals(0.0), 0.0);
    }

    #[test]
    fn blend_weights_sum_to_one() {
        let flat = ReadabilityScores {
            smog: 8.0,
            dale_chall: 8.0,
            ari: 8.0,
            coleman_liau: 8.0,
            flesch_kincaid: 8.0,
            gunning_fog: 8.0,
            ..ReadabilityScores::default()
        };
        assert!((blend(&flat) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn blend_favours_smog() {
        let smog_only = ReadabilityScores {
            smog: 8.0,
            ..ReadabilityScores::default()
        };
        assert!((blend(&smog_only) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_text_is_too_easy() {
        let c = GradeConfig::default();
        for text in ["", "   ", "\n\n\t"] {
            assert_eq!(
                score(text, &c),
                ScoreResult {
                    grade: 0.0,
                    hue: 120.0
                }
            );
        }
    }

    #[test]
    fn text_without_letters_is_too_easy() {
        let r = score(".", &GradeConfig::default());
        assert_eq!(r.grade, 0.0);
        assert_eq!(r.hue, 120.0);
        assert_eq!(score("42 ... 17!", &GradeConfig::default()).grade, 0.0);
    }

    #[test]
    fn hue_at_target_is_midpoint() {
        let c = GradeConfig::default();
        assert_eq!(c.gradient().hue_at(7.0), HUE_YELLOW);
        assert_eq!(c.gradient().hue_at(11.0), HUE_RED);
        assert_eq!(c.gradient().hue_at(18.5), HUE_RED);
    }

    #[test]
    fn simple_text_scores_easy() {
        let r = score(SIMPLE, &GradeConfig::new(Some(7.0), Some(11.0)));
        assert!(r.grade > 0.0 && r.grade < 5.0, "grade = {}", r.grade);
        assert_eq!(r.hue, 120.0);
    }

    #[test]
    fn dense_text_scores_hard() {
        let r = score(DENSE, &GradeConfig::new(Some(7.0), Some(11.0)));
        assert!(r.grade > 11.0, "grade = {}", r.grade);
        assert_eq!(r.hue, 0.0);
    }

    #[test]
    fn grade_is_rounded() {
        let r = score(DENSE, &GradeConfig::default());
        assert_eq!(r.grade, round_to_2_decimals(r.grade));
    }

    #[test]
    fn harder_text_never_gets_warmer_hue() {
        let c = GradeConfig::default();
        let easy = score(SIMPLE, &c);
        let hard = score(DENSE, &c);
        assert!(easy.grade < hard.grade);
        assert!(easy.hue >= hard.hue);
    }

    #[test]
    fn score_is_deterministic() {
        let c = GradeConfig::default();
        assert_eq!(score(DENSE, &c), score(DENSE, &c));
    }

    #[test]
    fn color_mode_changes_hue_not_grade() {
        let classic = GradeConfig::default();
        let clear = classic.with_color_mode(ColorMode::Clear);
        let a = score(DENSE, &classic);
        let b = score(DENSE, &clear);
        assert_eq!(a.grade, b.grade);
        assert_eq!(clear.gradient().hue_at(9.0), HUE_YELLOW);
        assert!(classic.gradient().hue_at(9.0) < HUE_YELLOW);
    }
}
