//! Command-line argument definitions for the indicator loader
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::constants::MAX_PARALLEL_WORKERS;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the indicator loader
///
/// Loads pre-generated delimited observation data into a catalog of
/// indicators, manages indicator metadata from manifest files, and reports
/// on batch runner output folders.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "indicator-loader",
    version,
    about = "Load pre-generated CSV observation data into an indicator catalog",
    long_about = "A command-line tool for data-catalog operations. Imports pre-generated \
                  delimited files into time-keyed observation records, atomically replacing \
                  each indicator's previous observation set. Also loads indicator metadata \
                  from JSON manifests and reports batch runner output folder status."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the indicator loader
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import pregen observation data for indicators (main command)
    Import(ImportArgs),
    /// Load indicator and part metadata from a JSON manifest
    LoadMetadata(LoadMetadataArgs),
    /// Report status of batch runner output folders
    Batches(BatchesArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Parser)]
pub struct GlobalArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file for advanced settings. If not specified,
    /// looks for ~/.config/indicator-loader/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Override the indicator database path
    #[arg(
        long = "database",
        value_name = "FILE",
        help = "Path to the indicator database (overrides configuration)"
    )]
    pub database: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the import command (main data loading)
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Specific indicators to import (comma-separated list of names)
    ///
    /// If not specified, imports every indicator that has pregen parts
    /// registered in the catalog.
    #[arg(
        short = 'i',
        long = "indicators",
        value_name = "LIST",
        help = "Comma-separated list of indicator names to import"
    )]
    pub indicators: Option<IndicatorList>,

    /// Number of parallel workers
    ///
    /// Controls how many indicators are imported concurrently. Defaults to
    /// the number of CPU cores.
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of parallel workers for importing"
    )]
    pub workers: Option<usize>,

    /// Perform a dry run without touching files or the store
    ///
    /// Lists what would be imported without reading any pregen file or
    /// writing any observation.
    #[arg(
        long = "dry-run",
        help = "Show what would be imported without writing anything"
    )]
    pub dry_run: bool,

    /// Output format for the summary report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the summary report"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Arguments for the load-metadata command
#[derive(Debug, Clone, Parser)]
pub struct LoadMetadataArgs {
    /// Path to the JSON metadata manifest
    #[arg(
        short = 'm',
        long = "manifest",
        value_name = "FILE",
        help = "Path to the JSON metadata manifest"
    )]
    pub manifest: PathBuf,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Arguments for the batches command
#[derive(Debug, Clone, Parser)]
pub struct BatchesArgs {
    /// Report a single batch run instead of listing all runs
    #[arg(
        long = "run-id",
        value_name = "RUN_ID",
        help = "Report a single batch run folder"
    )]
    pub run_id: Option<String>,

    /// Output format for the batch report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the batch report"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Wrapper for parsing comma-separated indicator name lists
#[derive(Debug, Clone)]
pub struct IndicatorList {
    pub names: Vec<String>,
}

impl FromStr for IndicatorList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let names: Vec<String> = s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if names.is_empty() {
            return Err(Error::data_validation(
                "Indicator list cannot be empty".to_string(),
            ));
        }

        Ok(IndicatorList { names })
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl GlobalArgs {
    /// Validate the shared options for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ImportArgs {
    /// Validate the import command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.global.validate()?;

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(Error::configuration(
                    "Number of workers must be greater than 0".to_string(),
                ));
            }
            if workers > MAX_PARALLEL_WORKERS {
                return Err(Error::configuration(format!(
                    "Number of workers cannot exceed {}",
                    MAX_PARALLEL_WORKERS
                )));
            }
        }

        Ok(())
    }

    /// Get the list of indicator names to import, if restricted
    pub fn get_indicators(&self) -> Option<Vec<String>> {
        self.indicators.as_ref().map(|list| list.names.clone())
    }
}

impl LoadMetadataArgs {
    /// Validate the load-metadata command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.global.validate()?;

        if !self.manifest.exists() {
            return Err(Error::configuration(format!(
                "Manifest file does not exist: {}",
                self.manifest.display()
            )));
        }

        Ok(())
    }
}

impl BatchesArgs {
    /// Validate the batches command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.global.validate()?;

        if let Some(run_id) = &self.run_id {
            if run_id.trim().is_empty() {
                return Err(Error::configuration(
                    "Run id cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Default for GlobalArgs {
    fn default() -> Self {
        Self {
            config_file: None,
            database: None,
            verbose: 0,
            quiet: false,
        }
    }
}

impl Default for ImportArgs {
    fn default() -> Self {
        Self {
            indicators: None,
            workers: None,
            dry_run: false,
            output_format: OutputFormat::Human,
            global: GlobalArgs::default(),
        }
    }
}
