//! Error types for readgrade-core.
//!
//! Scoring itself never fails: degenerate text scores as grade 0. The only
//! fallible surface is configuration.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,

    /// A grade setting is negative, NaN, or infinite.
    #[error("invalid {field}: {value} (expected a finite, non-negative grade)")]
    InvalidGrade {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;
