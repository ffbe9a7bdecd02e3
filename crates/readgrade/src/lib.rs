//! Library interface for the `readgrade` CLI.
//!
//! Exposes the argument parser and commands so `xtask` can generate man
//! pages and completions, and so tests can drive commands directly. The
//! entry point is in `main.rs`.

pub mod commands;
pub mod render;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Set global color output. Call once at startup.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                  Log filter (e.g., debug, readgrade=trace)
    READGRADE_LOG_PATH        Explicit log file path
    READGRADE_LOG_DIR         Log directory
    READGRADE_TARGET_GRADE    Default target grade
    READGRADE_MAX_GRADE       Default maximum grade
    READGRADE_COLOR_MODE      Default color scale (classic, clear)
    READGRADE_HIGHLIGHT_BY    Default highlight unit (sentence, paragraph)
    READGRADE_LOG_LEVEL       Log level when RUST_LOG is unset
";

/// Command-line interface definition for readgrade.
#[derive(Parser)]
#[command(name = "readgrade")]
#[command(
    about = "Score text for reading grade level and highlight the hard parts",
    long_about = None
)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Score a text's reading grade level
    Score(commands::score::ScoreArgs),

    /// Print a text with each sentence or paragraph colored by grade
    Highlight(commands::highlight::HighlightArgs),

    /// Show package information and resolved configuration
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
