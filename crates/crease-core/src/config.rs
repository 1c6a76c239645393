// Configuration loading and parsing (config/crease.toml).

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::stats::{parse_metrics, Metric};

/// File name of the configuration inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "crease.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub data: DataSource,
    pub dashboard: DashboardConfig,
}

/// Raw deserialization target for crease.toml.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    data: DataSource,
    dashboard: DashboardSection,
}

/// Where the season files live and how they are named.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataSource {
    pub dir: PathBuf,
    pub file_prefix: String,
    pub extension: String,
    /// Seasons to load, in load order.
    pub years: Vec<u16>,
}

impl DataSource {
    /// `{prefix}{year}.{ext}`
    pub fn file_name(&self, year: u16) -> String {
        format!("{}{}.{}", self.file_prefix, year, self.extension)
    }

    pub fn path_for(&self, year: u16) -> PathBuf {
        self.dir.join(self.file_name(year))
    }

    /// Resolve a relative `dir` against `base`.
    pub fn rooted_at(mut self, base: &Path) -> Self {
        if self.dir.is_relative() {
            self.dir = base.join(&self.dir);
        }
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DashboardSection {
    title: String,
    top_n: usize,
    default_search: String,
    overview_metrics: Vec<String>,
    player_metrics: Vec<String>,
    default_metric: String,
    chart_color: String,
}

/// Dashboard settings with metric names already resolved.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub title: String,
    /// Number of leaders shown in the "Top Batters" panel.
    pub top_n: usize,
    /// Query used when a search matches nobody.
    pub default_search: String,
    pub overview_metrics: Vec<Metric>,
    pub player_metrics: Vec<Metric>,
    pub default_metric: Metric,
    /// Colour (name or `#RRGGBB`), interpreted by the UI.
    pub chart_color: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/crease.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, &path)
}

/// Parse and validate configuration text. `path` is only used for errors.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let section = file.dashboard;
    let metric_list = |field: &str, names: &[String]| {
        parse_metrics(names).map_err(|e| ConfigError::ValidationError {
            field: field.into(),
            message: e.to_string(),
        })
    };
    let dashboard = DashboardConfig {
        overview_metrics: metric_list("dashboard.overview_metrics", &section.overview_metrics)?,
        player_metrics: metric_list("dashboard.player_metrics", &section.player_metrics)?,
        default_metric: section
            .default_metric
            .parse::<Metric>()
            .map_err(|e| ConfigError::ValidationError {
                field: "dashboard.default_metric".into(),
                message: e.to_string(),
            })?,
        title: section.title,
        top_n: section.top_n,
        default_search: section.default_search,
        chart_color: section.chart_color,
    };

    let config = Config {
        data: file.data,
        dashboard,
    };
    validate(&config)?;
    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // Never overwrite a user's edited config
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    let mut config = load_config_from(&cwd)?;
    config.data = config.data.rooted_at(&cwd);
    Ok(config)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let data = &config.data;
    if data.years.is_empty() {
        return Err(invalid("data.years", "must list at least one season"));
    }
    let mut seen = HashSet::new();
    for year in &data.years {
        if !seen.insert(year) {
            return Err(invalid("data.years", format!("season {year} listed twice")));
        }
    }
    if data.file_prefix.trim().is_empty() {
        return Err(invalid("data.file_prefix", "must not be empty"));
    }
    if data.extension.trim().is_empty() {
        return Err(invalid("data.extension", "must not be empty"));
    }

    let dash = &config.dashboard;
    if dash.top_n == 0 {
        return Err(invalid("dashboard.top_n", "must be greater than 0"));
    }
    if dash.player_metrics.is_empty() {
        return Err(invalid("dashboard.player_metrics", "must list at least one metric"));
    }
    if dash.default_search.trim().is_empty() {
        return Err(invalid("dashboard.default_search", "must not be empty"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
