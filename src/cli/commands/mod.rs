//! Command implementations for the indicator loader CLI
//!
//! This module contains the main command execution logic, progress
//! reporting, and error handling for the CLI interface. Each command is
//! implemented in its own module.

pub mod batches;
pub mod import;
pub mod load_metadata;
pub mod shared;

pub use import::ImportRunSummary;

use crate::cli::args::{Args, Commands};
use crate::Result;

/// Main command runner for the indicator loader
///
/// Dispatches to the appropriate subcommand handler based on CLI args:
/// - `import`: pregen observation import with wholesale replacement
/// - `load-metadata`: JSON manifest loading into the catalog
/// - `batches`: batch runner output folder status
pub async fn run(args: Args) -> Result<()> {
    match args.get_command() {
        Commands::Import(import_args) => import::run_import(import_args).await,
        Commands::LoadMetadata(load_args) => load_metadata::run_load_metadata(load_args).await,
        Commands::Batches(batches_args) => batches::run_batches(batches_args).await,
    }
}
