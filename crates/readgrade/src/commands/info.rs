//! Info command implementation

use clap::Args;
use owo_colors::{OwoColorize, Stream, Style};
use readgrade_core::config::{Config, ConfigSources, GradeOverrides};
use readgrade_core::{ColorMode, HighlightBy};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    config_file: Option<String>,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    target_grade: Option<f64>,
    max_grade: Option<f64>,
    highlight_by: HighlightBy,
    color_mode: ColorMode,
    input_limit: Option<usize>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            target_grade: config.target_grade,
            max_grade: config.max_grade,
            highlight_by: config.highlight_by,
            color_mode: config.color_mode,
            input_limit: config.input_limit(),
        }
    }
}

/// Grade bounds after fallback rules are applied.
#[derive(Serialize)]
struct EffectiveGrades {
    target_grade: f64,
    max_grade: Option<f64>,
    too_easy_grade: f64,
    too_hard_grade: f64,
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    effective: Option<EffectiveGrades>,
}

/// Print package information and the resolved configuration.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    // Invalid grades in config are reported by `score`; here they just hide the effective section.
    let effective = GradeOverrides::default()
        .resolve(config)
        .ok()
        .map(|g| EffectiveGrades {
            target_grade: g.target_grade(),
            max_grade: g.max_grade(),
            too_easy_grade: g.too_easy_grade(),
            too_hard_grade: g.too_hard_grade(),
        });

    let info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
        effective,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        info.package.name.if_supports_color(Stream::Stdout, |t| t.bold()),
        info.package.version.if_supports_color(Stream::Stdout, |t| t.green())
    );
    if !info.package.description.is_empty() {
        println!("{}", info.package.description);
    }
    if !info.package.license.is_empty() {
        println!("{}: {}", dim(&"License"), info.package.license);
    }
    if !info.package.repository.is_empty() {
        println!(
            "{}: {}",
            dim(&"Repository"),
            info.package.repository.if_supports_color(Stream::Stdout, |t| t.cyan())
        );
    }

    println!();
    println!("{}", heading(&"Configuration"));
    match info.config.config_file {
        Some(ref path) => println!(
            "{}: {}",
            dim(&"Config file"),
            path.if_supports_color(Stream::Stdout, |t| t.cyan())
        ),
        None => println!(
            "{}: {}",
            dim(&"Config file"),
            "none loaded".if_supports_color(Stream::Stdout, |t| t.yellow())
        ),
    }
    println!("{}: {}", dim(&"Log level"), info.config.log_level);
    if let Some(ref dir) = info.config.log_dir {
        println!("{}: {}", dim(&"Log directory"), dir);
    }
    println!("{}: {}", dim(&"Highlight by"), info.config.highlight_by);
    println!("{}: {}", dim(&"Color mode"), info.config.color_mode);
    match info.config.input_limit {
        Some(limit) => println!("{}: {limit} bytes", dim(&"Input limit")),
        None => println!(
            "{}: {}",
            dim(&"Input limit"),
            "disabled".if_supports_color(Stream::Stdout, |t| t.yellow())
        ),
    }

    println!();
    println!("{}", heading(&"Grades"));
    print_opt("Target grade", info.config.target_grade);
    print_opt("Max grade", info.config.max_grade);
    if let Some(ref g) = info.effective {
        println!(
            "{}: too easy ≤ {}, target {}, too hard ≥ {}",
            dim(&"Effective"),
            g.too_easy_grade,
            g.target_grade,
            g.too_hard_grade
        );
    }

    Ok(())
}

fn heading<T: std::fmt::Display>(value: &T) -> impl std::fmt::Display + '_ {
    value.if_supports_color(Stream::Stdout, |v| v.style(Style::new().bold().underline()))
}

fn dim<T: std::fmt::Display>(value: &T) -> impl std::fmt::Display + '_ {
    value.if_supports_color(Stream::Stdout, |v| v.dimmed())
}

fn print_opt(label: &str, value: Option<f64>) {
    match value {
        Some(v) => println!("{}: {v}", dim(&label)),
        None => println!("{}: {}", dim(&label), dim(&"(not set)")),
    }
}
