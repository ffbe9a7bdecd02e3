//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;
use clap::Args;
use readgrade_core::config::{Config, GradeOverrides};
use readgrade_core::{ColorMode, GradeConfig, markdown};

pub mod highlight;
pub mod info;
pub mod score;
#[cfg(feature = "mcp")]
pub mod serve;

/// Path argument meaning "read standard input".
pub const STDIN_PATH: &str = "-";

/// Grade flags shared by `score` and `highlight`.
#[derive(Args, Debug, Default, Clone)]
pub struct GradeArgs {
    /// Target grade level (falls back to --max-grade, then 7)
    #[arg(long, value_name = "GRADE")]
    pub target_grade: Option<f64>,

    /// Maximum grade level; exceeding it is an error
    #[arg(long, value_name = "GRADE")]
    pub max_grade: Option<f64>,

    /// Color scale
    #[arg(long, value_enum)]
    pub color_mode: Option<ColorMode>,

    /// Treat input as markdown (automatic for .md files)
    #[arg(long)]
    pub markdown: bool,
}

impl GradeArgs {
    /// The flags as overrides on top of config.
    pub const fn overrides(&self) -> GradeOverrides {
        GradeOverrides {
            target_grade: self.target_grade,
            max_grade: self.max_grade,
            color_mode: self.color_mode,
        }
    }

    /// Merge with config into a grade configuration.
    pub fn resolve(&self, config: &Config) -> anyhow::Result<GradeConfig> {
        self.overrides()
            .resolve(config)
            .context("invalid grade settings")
    }

    /// Whether `path` should be reduced to prose before scoring.
    pub fn wants_markdown(&self, path: &Utf8Path) -> bool {
        self.markdown || markdown::is_markdown_path(path.as_str())
    }
}

/// Read a file (or stdin for `-`) and validate its size against the limit.
pub fn read_input(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if path.as_str() == STDIN_PATH {
        return read_stdin(max_bytes);
    }

    // Check the size before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len();
        if size > max as u64 {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    let stdin = std::io::stdin().lock();
    match max_bytes {
        Some(max) => {
            stdin
                .take(max as u64 + 1)
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
            if content.len() > max {
                anyhow::bail!("input too large: standard input exceeds {max} bytes");
            }
        }
        None => {
            let mut stdin = stdin;
            stdin
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
        }
    }
    Ok(content)
}

/// Read input and strip markdown when asked to.
pub fn load_text(
    path: &Utf8Path,
    grades: &GradeArgs,
    max_bytes: Option<usize>,
) -> anyhow::Result<String> {
    let content = read_input(path, max_bytes)?;
    Ok(if grades.wants_markdown(path) {
        markdown::strip_to_prose(&content)
    } else {
        content
    })
}

/// Label for an input path in output.
pub fn display_name(path: &Utf8Path) -> &str {
    if path.as_str() == STDIN_PATH {
        "<stdin>"
    } else {
        path.as_str()
    }
}
