//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::app::services::observation_store::SqliteObservationStore;
use crate::cli::args::GlobalArgs;
use crate::config::Config;
use crate::{Error, Result};

/// Set up structured logging based on shared CLI options
pub fn setup_logging(global: &GlobalArgs) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = global.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("indicator_loader={}", log_level)));

    if global.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> args)
pub fn load_configuration(global: &GlobalArgs) -> Result<Config> {
    info!("Loading configuration");

    let default_config_path = if global.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &global.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults");
    }

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, global);
    config.validate()?;

    Ok(config)
}

/// Apply shared CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, global: &GlobalArgs) {
    if let Some(database) = &global.database {
        config.storage.database_path = database.clone();
    }

    config.logging.level = global.get_log_level().to_string();
    config.logging.structured = !global.quiet;
}

/// Open the observation store configured for this run
pub fn open_store(config: &Config) -> Result<Arc<SqliteObservationStore>> {
    config.ensure_directories()?;
    let store = SqliteObservationStore::open(&config.storage.database_path)?;
    Ok(Arc::new(store))
}

/// Create a progress bar for tracking per-indicator work
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Check if an error is critical enough to stop processing
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. }
            | Error::Storage { .. }
            | Error::ProcessingInterrupted { .. }
    )
}
