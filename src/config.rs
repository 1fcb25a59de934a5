//! Configuration management and validation.
//!
//! Provides layered configuration for the indicator loader: built-in
//! defaults, an optional TOML config file, and CLI argument overrides
//! applied by the command layer.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants;
use crate::{Error, Result};

/// Top-level configuration for the indicator loader
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Observation store location
    pub storage: StorageConfig,

    /// Pre-generated CSV file locations
    pub pregen: PregenConfig,

    /// Batch run folder locations
    pub batches: BatchesConfig,

    /// Performance tuning
    pub performance: PerformanceConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Observation store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite observation store database
    pub database_path: PathBuf,
}

/// Pre-generated CSV input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PregenConfig {
    /// Root directory containing per-part pre-generated CSV files
    pub root: PathBuf,
}

/// Batch run folder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchesConfig {
    /// Directory containing batch run folders, one per run id
    pub root: PathBuf,
}

/// Performance tuning settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of indicators imported concurrently
    pub parallel_workers: usize,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,

    /// Emit timestamped structured output
    pub structured: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            pregen: PregenConfig::default(),
            batches: BatchesConfig::default(),
            performance: PerformanceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_data_dir().join(constants::DEFAULT_STORE_FILENAME),
        }
    }
}

impl Default for PregenConfig {
    fn default() -> Self {
        Self {
            root: default_data_dir().join(constants::DEFAULT_PREGEN_DIR_NAME),
        }
    }
}

impl Default for BatchesConfig {
    fn default() -> Self {
        Self {
            root: default_data_dir().join(constants::DEFAULT_BATCHES_DIR_NAME),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_workers: constants::default_parallel_workers(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            structured: true,
        }
    }
}

/// Platform data directory for the application, falling back to the
/// current directory when the platform reports none
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(constants::APP_DIR_NAME)
}

impl Config {
    /// Default config file location under the platform config directory
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Unable to determine config directory"))?;
        Ok(config_dir
            .join(constants::APP_DIR_NAME)
            .join(constants::CONFIG_FILENAME))
    }

    /// Load configuration from defaults, then merge an optional TOML file
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => {
                debug!("Loading config file: {}", path.display());
                Self::from_toml_file(path)?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    /// Parse a TOML config file; missing sections keep their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&contents).map_err(|e| {
            Error::configuration(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Validate the assembled configuration
    pub fn validate(&self) -> Result<()> {
        if self.performance.parallel_workers == 0 {
            return Err(Error::configuration(
                "performance.parallel_workers must be at least 1",
            ));
        }

        if self.storage.database_path.as_os_str().is_empty() {
            return Err(Error::configuration(
                "storage.database_path must not be empty",
            ));
        }

        if self.pregen.root.exists() && !self.pregen.root.is_dir() {
            return Err(Error::configuration(format!(
                "pregen.root '{}' exists but is not a directory",
                self.pregen.root.display()
            )));
        }

        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => {
                return Err(Error::configuration(format!(
                    "Unknown log level '{}', expected error, warn, info, debug or trace",
                    other
                )));
            }
        }

        Ok(())
    }

    /// Create the directory holding the observation store if missing
    pub fn ensure_directories(&self) -> Result<()> {
        if let Some(parent) = self.storage.database_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::configuration(format!(
                        "Failed to create store directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        Ok(())
    }
}
