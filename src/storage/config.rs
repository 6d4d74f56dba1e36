//! Configuration handling for taskboard
//!
//! Settings are read from TOML files in two layers, later layers overriding
//! earlier ones key by key:
//!
//! 1. global: `~/.config/taskboard/config.toml` (platform equivalent)
//! 2. local: `--config <path>` if given, otherwise `./taskboard.toml`
//!
//! Missing files are skipped. Command-line flags override both layers.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::export::{ExportFormat, DEFAULT_EXPORT_FILE};

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = "taskboard.toml";

/// Interval between background reports when none is configured
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(2);

/// Console output format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Effective settings for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Seconds between background reports
    pub report_interval_secs: u64,

    /// Seconds the demo waits before stopping the reporter
    pub linger_secs: u64,

    /// Where the demo writes its task export
    pub export_path: PathBuf,

    /// Line format of the export
    pub export_format: ExportFormat,

    /// Output format when `--format` is not given
    pub default_format: OutputFormat,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            report_interval_secs: DEFAULT_REPORT_INTERVAL.as_secs(),
            linger_secs: 4,
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
            export_format: ExportFormat::Text,
            default_format: OutputFormat::Text,
        }
    }
}

impl BoardConfig {
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }

    pub fn linger(&self) -> Duration {
        Duration::from_secs(self.linger_secs)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.report_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "report_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Loaded configuration together with the files it came from
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub board: BoardConfig,
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration from the default locations
    ///
    /// An explicit path must exist; the default local file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let global = Self::global_config_dir().map(|dir| dir.join("config.toml"));

        let local = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::Read {
                        path: path.to_path_buf(),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "config file not found",
                        ),
                    });
                }
                Some(path.to_path_buf())
            }
            None => Some(PathBuf::from(LOCAL_CONFIG_FILE)),
        };

        Self::load_layers(global.iter().chain(local.iter()).map(PathBuf::as_path))
    }

    /// Merges the given files in order; files that do not exist are skipped
    pub fn load_layers<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Result<Self, ConfigError> {
        let mut merged = toml::Table::new();
        let mut sources = Vec::new();

        for path in paths {
            if !path.is_file() {
                continue;
            }

            let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let table: toml::Table = toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

            tracing::debug!(path = %path.display(), keys = table.len(), "loaded config layer");
            merged.extend(table);
            sources.push(path.to_path_buf());
        }

        let board = BoardConfig::deserialize(toml::Value::Table(merged))
            .map_err(|e| ConfigError::Invalid(e.to_string()))?
            .validate()?;

        Ok(Self { board, sources })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "taskboard", "taskboard").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Renders the effective settings as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&self.board)
    }
}
