//! Grade-to-hue color scale.
//!
//! A [`HueGradient`] is a piecewise-linear map from grade level to hue,
//! defined by stops placed at grade positions. Below the first stop the hue
//! stays at the "too easy" end; past the last it saturates at "too hard".
//! Hues never increase along the stops, so the map is monotone.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hue for text that is comfortably easy.
pub const HUE_GREEN: f64 = 120.0;
/// Hue for text on target.
pub const HUE_YELLOW: f64 = 60.0;
/// Hue for text that is too hard.
pub const HUE_RED: f64 = 0.0;

/// Highlight saturation, as a fraction.
pub const HIGHLIGHT_SATURATION: f64 = 0.93;
/// Highlight lightness, as a fraction. Light enough to read black text over.
pub const HIGHLIGHT_LIGHTNESS: f64 = 0.85;

/// Shape of the color scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ColorMode {
    /// Green → yellow at target → red at the too-hard grade.
    #[default]
    Classic,
    /// Clear yellow/red bands: yellow holds from target to the midpoint of
    /// the hard range, then ramps to red. Units at or below target are not
    /// highlighted.
    Clear,
}

impl ColorMode {
    /// Returns the mode as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Clear => "clear",
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point on the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct ColorStop {
    /// Grade level at which this hue applies.
    pub grade: f64,
    /// Hue in degrees.
    pub hue: f64,
}

/// Piecewise-linear grade → hue map.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct HueGradient {
    stops: Vec<ColorStop>,
}

impl HueGradient {
    /// Build a gradient from `(grade, hue)` pairs.
    ///
    /// Stops must be ordered by grade; equal grades are allowed and produce
    /// a step.
    pub fn new(stops: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let stops: Vec<ColorStop> = stops
            .into_iter()
            .map(|(grade, hue)| ColorStop { grade, hue })
            .collect();
        debug_assert!(!stops.is_empty(), "gradient needs at least one stop");
        debug_assert!(
            stops.windows(2).all(|w| w[0].grade <= w[1].grade),
            "gradient stops must be ordered by grade"
        );
        Self { stops }
    }

    /// Three stops: too easy (green), target (yellow), too hard (red).
    pub fn classic(too_easy: f64, target: f64, too_hard: f64) -> Self {
        Self::new([
            (too_easy, HUE_GREEN),
            (target, HUE_YELLOW),
            (too_hard, HUE_RED),
        ])
    }

    /// Four stops: the yellow band extends to the midpoint between target
    /// and too hard before ramping to red.
    pub fn clear(too_easy: f64, target: f64, too_hard: f64) -> Self {
        let hard = target + (too_hard - target) / 2.0;
        Self::new([
            (too_easy, HUE_GREEN),
            (target, HUE_YELLOW),
            (hard, HUE_YELLOW),
            (too_hard, HUE_RED),
        ])
    }

    /// The gradient's stops.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Hue at the "too easy" end.
    pub fn easiest_hue(&self) -> f64 {
        self.stops.first().map_or(HUE_GREEN, |s| s.hue)
    }

    /// Hue at the "too hard" end.
    pub fn hardest_hue(&self) -> f64 {
        self.stops.last().map_or(HUE_RED, |s| s.hue)
    }

    /// Hue for a grade, clamped to the gradient's ends.
    pub fn hue_at(&self, grade: f64) -> f64 {
        let Some(first) = self.stops.first() else {
            return HUE_GREEN;
        };
        if grade <= first.grade {
            return first.hue;
        }
        for pair in self.stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if grade <= to.grade {
                let width = to.grade - from.grade;
                if width <= 0.0 {
                    return to.hue;
                }
                return lerp(from.hue, to.hue, (grade - from.grade) / width);
            }
        }
        self.hardest_hue()
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    (to - from).mul_add(t, from)
}

/// A highlight background derived from a hue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HighlightColor {
    /// Hue in degrees.
    pub hue: f64,
    /// Saturation, 0--1.
    pub saturation: f64,
    /// Lightness, 0--1.
    pub lightness: f64,
}

impl HighlightColor {
    /// The standard highlight tint for a hue.
    pub const fn from_hue(hue: f64) -> Self {
        Self {
            hue,
            saturation: HIGHLIGHT_SATURATION,
            lightness: HIGHLIGHT_LIGHTNESS,
        }
    }

    /// CSS `hsl()` notation, e.g. `hsl(120, 93%, 85%)`.
    pub fn css(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            round_hue(self.hue),
            (self.saturation * 100.0).round(),
            (self.lightness * 100.0).round()
        )
    }

    /// Convert to 8-bit sRGB.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h {
            h if h < 1.0 => (chroma, x, 0.0),
            h if h < 2.0 => (x, chroma, 0.0),
            h if h < 3.0 => (0.0, chroma, x),
            h if h < 4.0 => (0.0, x, chroma),
            h if h < 5.0 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        (to_byte(r + m), to_byte(g + m), to_byte(b + m))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Hues print with at most two decimals and no trailing zeros.
fn round_hue(hue: f64) -> f64 {
    (hue * 100.0).round() / 100.0
}
