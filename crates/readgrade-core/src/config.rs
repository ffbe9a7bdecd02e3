//! Configuration loading and discovery.
//!
//! Settings are layered with figment, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. User config: `~/.config/readgrade/config.<ext>`
//! 3. Project config: `.readgrade.<ext>` then `readgrade.<ext>`, found by
//!    walking up from the search root until a `.git` boundary
//! 4. Explicit files (the `--config` flag)
//! 5. `READGRADE_*` environment variables
//!
//! Where `<ext>` is one of `toml`, `yaml`, `yml`, `json`. When several files
//! sit in the same directory they are all merged, later extensions winning.
//!
//! ```no_run
//! use camino::Utf8PathBuf;
//! use readgrade_core::config::{ConfigLoader, GradeOverrides};
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir().unwrap()).unwrap();
//! let (config, _sources) = ConfigLoader::new().with_project_search(&cwd).load().unwrap();
//! let grades = GradeOverrides::default().resolve(&config).unwrap();
//! println!("target grade {}", grades.target_grade());
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::gradient::ColorMode;
use crate::highlight::HighlightBy;
use crate::scorer::GradeConfig;

/// The configuration for readgrade.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for log files (falls back to platform defaults if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Target grade level. Text above it draws a warning.
    pub target_grade: Option<f64>,
    /// Maximum grade level. Text above it fails.
    pub max_grade: Option<f64>,
    /// Default highlight unit.
    pub highlight_by: HighlightBy,
    /// Default color scale.
    pub color_mode: ColorMode,
    /// Maximum input size in bytes (default: 5 MiB).
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    pub disable_input_limit: bool,
}

impl Config {
    /// The effective input size limit, or `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Per-invocation grade settings from CLI flags or MCP parameters.
///
/// Any field left `None` falls back to the loaded [`Config`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct GradeOverrides {
    /// Target grade level.
    pub target_grade: Option<f64>,
    /// Maximum grade level.
    pub max_grade: Option<f64>,
    /// Color scale.
    pub color_mode: Option<ColorMode>,
}

impl GradeOverrides {
    /// Merge with config and build a [`GradeConfig`].
    ///
    /// Rejects negative or non-finite grades. Zero is accepted and treated
    /// as unset.
    pub fn resolve(&self, config: &Config) -> ConfigResult<GradeConfig> {
        let target = check_grade("target_grade", self.target_grade.or(config.target_grade))?;
        let max = check_grade("max_grade", self.max_grade.or(config.max_grade))?;
        let color_mode = self.color_mode.unwrap_or(config.color_mode);
        Ok(GradeConfig::new(target, max).with_color_mode(color_mode))
    }
}

fn check_grade(field: &'static str, value: Option<f64>) -> ConfigResult<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ConfigError::InvalidGrade { field, value: v }),
        other => Ok(other),
    }
}

/// Which configuration sources were loaded.
///
/// Returned alongside [`Config`] so commands can report the files in play
/// without re-discovering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files (`--config`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The highest-precedence config file that was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions, lowest precedence first.
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "readgrade";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "READGRADE_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader that reads user config and stops project search at `.git`.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from this directory looking for project config.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/readgrade/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the upward search at a directory containing this name.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file. Later files win.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = Self::find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // READGRADE_TARGET_GRADE=8, READGRADE_COLOR_MODE=clear, ...
        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            target_grade = ?config.target_grade,
            max_grade = ?config.max_grade,
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Load configuration, failing when no config file exists anywhere.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && Self::find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .is_some_and(|root| !self.find_project_configs(root).is_empty());
        let has_explicit = !self.explicit_files.is_empty();

        if !has_user && !has_project && !has_explicit {
            return Err(ConfigError::NotFound);
        }

        self.load()
    }

    /// Config files in the closest directory that has any, dotfiles first.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let dotfiles = CONFIG_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!(".{APP_NAME}.{ext}")));
            let regular = CONFIG_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{APP_NAME}.{ext}")));
            let found: Vec<Utf8PathBuf> = dotfiles.chain(regular).filter(|p| p.is_file()).collect();

            if !found.is_empty() {
                return found;
            }

            // Checked after the config files so a config beside the marker is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    fn find_user_config() -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|p| p.is_file())
    }

    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// The user config directory (`~/.config/readgrade/` on Linux).
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

/// The machine-local data directory (`~/.local/share/readgrade/` on Linux).
///
/// Used as the default log location.
pub fn user_data_local_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.data_local_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn write_config(dir: &TempDir, name: &str, body: &str) -> Utf8PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        Utf8PathBuf::try_from(path).unwrap()
    }

    fn load_file(path: &Utf8Path) -> Config {
        ConfigLoader::new()
            .with_user_config(false)
            .with_file(path)
            .load()
            .unwrap()
            .0
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.target_grade.is_none());
        assert!(config.max_grade.is_none());
        assert_eq!(config.highlight_by, HighlightBy::Sentence);
        assert_eq!(config.color_mode, ColorMode::Classic);
        assert!(!config.disable_input_limit);
    }

    #[test]
    fn loader_builds_with_defaults() {
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn toml_file_sets_grades() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            "config.toml",
            "target_grade = 6.5\nmax_grade = 10\nhighlight_by = \"paragraph\"\ncolor_mode = \"clear\"\n",
        );
        let config = load_file(&path);
        assert_eq!(config.target_grade, Some(6.5));
        assert_eq!(config.max_grade, Some(10.0));
        assert_eq!(config.highlight_by, HighlightBy::Paragraph);
        assert_eq!(config.color_mode, ColorMode::Clear);
    }

    #[test]
    fn yaml_and_json_files() {
        let tmp = TempDir::new().unwrap();
        let yaml = write_config(&tmp, "config.yaml", "max_grade: 9\nlog_level: debug\n");
        let config = load_file(&yaml);
        assert_eq!(config.max_grade, Some(9.0));
        assert_eq!(config.log_level, LogLevel::Debug);

        let json = write_config(&tmp, "config.json", r#"{"target_grade": 8}"#);
        assert_eq!(load_file(&json).target_grade, Some(8.0));
    }

    #[test]
    fn later_file_overrides_earlier() {
        let tmp = TempDir::new().unwrap();
        let base = write_config(&tmp, "base.toml", "max_grade = 12\ntarget_grade = 8\n");
        let over = write_config(&tmp, "override.toml", "max_grade = 10\n");

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&base)
            .with_file(&over)
            .load()
            .unwrap();

        assert_eq!(config.max_grade, Some(10.0));
        assert_eq!(config.target_grade, Some(8.0));
        assert_eq!(sources.primary_file(), Some(over.as_path()));
    }

    #[test]
    fn project_config_discovery() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        let deep = project.join("docs").join("leaflets");
        fs::create_dir_all(&deep).unwrap();
        fs::write(project.join(".readgrade.toml"), "target_grade = 6\n").unwrap();

        let deep = Utf8PathBuf::try_from(deep).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&deep)
            .load()
            .unwrap();

        assert_eq!(config.target_grade, Some(6.0));
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn regular_file_beats_dotfile() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".readgrade.toml"), "target_grade = 6\n").unwrap();
        fs::write(tmp.path().join("readgrade.toml"), "target_grade = 8\n").unwrap();

        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&root)
            .load()
            .unwrap();

        assert_eq!(config.target_grade, Some(8.0));
        assert_eq!(sources.project_files.len(), 2);
    }

    #[test]
    fn boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(parent.join(".readgrade.toml"), "max_grade = 4\n").unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let work = Utf8PathBuf::try_from(work).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(&work)
            .load()
            .unwrap();

        assert!(config.max_grade.is_none());
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn explicit_file_overrides_project_config() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, ".readgrade.toml", "max_grade = 12\n");
        let explicit = write_config(&tmp, "strict.toml", "max_grade = 8\n");

        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&root)
            .with_file(&explicit)
            .load()
            .unwrap();

        assert_eq!(config.max_grade, Some(8.0));
        assert_eq!(sources.explicit_files.len(), 1);
    }

    #[test]
    fn load_or_error_fails_when_no_config() {
        let result = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load_or_error();
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn invalid_enum_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "config.toml", "color_mode = \"rainbow\"\n");
        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&path)
            .load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn input_limit() {
        let mut config = Config::default();
        assert_eq!(config.input_limit(), Some(crate::DEFAULT_MAX_INPUT_BYTES));
        config.max_input_bytes = Some(1024);
        assert_eq!(config.input_limit(), Some(1024));
        config.disable_input_limit = true;
        assert_eq!(config.input_limit(), None);
    }

    #[test]
    fn overrides_take_precedence_over_config() {
        let config = Config {
            target_grade: Some(8.0),
            max_grade: Some(12.0),
            color_mode: ColorMode::Clear,
            ..Config::default()
        };
        let grades = GradeOverrides {
            target_grade: Some(6.0),
            ..GradeOverrides::default()
        }
        .resolve(&config)
        .unwrap();
        assert_eq!(grades.target_grade(), 6.0);
        assert_eq!(grades.max_grade(), Some(12.0));
        assert_eq!(grades.color_mode(), ColorMode::Clear);
    }

    #[test]
    fn resolve_falls_back_to_max_then_seven() {
        let config = Config {
            max_grade: Some(9.0),
            ..Config::default()
        };
        let grades = GradeOverrides::default().resolve(&config).unwrap();
        assert_eq!(grades.target_grade(), 9.0);
        assert!(!grades.target_requested());

        let grades = GradeOverrides::default().resolve(&Config::default()).unwrap();
        assert_eq!(grades.target_grade(), 7.0);
    }

    #[test]
    fn resolve_rejects_negative_grades() {
        let overrides = GradeOverrides {
            max_grade: Some(-1.0),
            ..GradeOverrides::default()
        };
        let err = overrides.resolve(&Config::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidGrade {
                field: "max_grade",
                ..
            }
        ));
    }

    #[test]
    fn user_config_dir_names_app() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("readgrade"));
        }
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let config = Config {
            target_grade: Some(7.5),
            highlight_by: HighlightBy::Paragraph,
            ..Config::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("highlight_by: paragraph"));
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    #[allow(unsafe_code)]
    fn env_var_overrides_file_config() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            "config.toml",
            "highlight_by = \"sentence\"\ndisable_input_limit = false\n",
        );

        // SAFETY: Test environment; the mutex serializes env access.
        unsafe {
            std::env::set_var("READGRADE_HIGHLIGHT_BY", "paragraph");
            std::env::set_var("READGRADE_DISABLE_INPUT_LIMIT", "true");
        }

        let config = load_file(&path);

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("READGRADE_HIGHLIGHT_BY");
            std::env::remove_var("READGRADE_DISABLE_INPUT_LIMIT");
        }

        assert_eq!(config.highlight_by, HighlightBy::Paragraph);
        assert!(config.disable_input_limit);
    }
}
