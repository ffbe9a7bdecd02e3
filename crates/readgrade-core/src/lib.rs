//! Core library for readgrade.
//!
//! Scores text for reading grade level by blending six standard readability
//! formulas (SMOG weighted highest), and maps the grade onto a green → yellow
//! → red hue relative to a target grade.
//!
//! # Modules
//!
//! - [`scorer`] - Grade configuration and the [`score`] entry point
//! - [`highlight`] - Per-sentence or per-paragraph scoring and verdicts
//! - [`gradient`] - Grade → hue mapping and highlight colors
//! - [`stats`] - The individual formulas and the counts behind them
//! - [`text`] - Sentence and paragraph segmentation
//! - [`lexicon`] - Syllable, familiar-word, and abbreviation tables
//! - [`markdown`] - Markdown to prose
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use readgrade_core::{GradeConfig, score};
//!
//! let grades = GradeConfig::new(Some(7.0), Some(11.0));
//! let result = score("The cat sat on the mat. The dog ran to the park.", &grades);
//! assert!(result.grade < 7.0);
//! assert_eq!(result.hue, 120.0);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod gradient;
pub mod highlight;
pub mod lexicon;
pub mod markdown;
pub mod scorer;
pub mod stats;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, GradeOverrides, LogLevel};
pub use error::{ConfigError, ConfigResult};
pub use gradient::{ColorMode, HighlightColor, HueGradient};
pub use highlight::{HighlightBy, HighlightReport, HighlightUnit, Verdict, highlight};
pub use scorer::{GradeConfig, ScoreResult, score};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
