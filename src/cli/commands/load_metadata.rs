//! Load-metadata command implementation
//!
//! Reads a JSON manifest of indicators and pregen parts and writes it
//! into the store.

use colored::*;
use tracing::{debug, info};

use crate::app::services::metadata_loader::MetadataManifest;
use crate::cli::args::LoadMetadataArgs;
use crate::cli::commands::shared;
use crate::Result;

/// Run the load-metadata command
pub async fn run_load_metadata(args: LoadMetadataArgs) -> Result<()> {
    shared::setup_logging(&args.global)?;
    info!("Loading metadata manifest {}", args.manifest.display());
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = shared::load_configuration(&args.global)?;
    let store = shared::open_store(&config)?;

    let manifest = MetadataManifest::from_path(&args.manifest)?;
    let summary = manifest.load_into(&store)?;

    if !args.global.quiet {
        println!("\n{}", "Metadata Loaded".bright_green().bold());
        println!(
            "  Indicators: {}",
            summary.indicators_loaded.to_string().bright_white().bold()
        );
        println!(
            "  Parts:      {}",
            summary.parts_loaded.to_string().bright_white().bold()
        );
    }

    Ok(())
}
