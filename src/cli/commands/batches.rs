//! Batches command implementation
//!
//! Reports the status of batch runner output folders, either one run by
//! id or every run under the batches root.

use colored::*;
use tracing::{debug, info};

use crate::app::services::batch_status::{BatchInfo, BatchScanner};
use crate::cli::args::{BatchesArgs, OutputFormat};
use crate::cli::commands::shared;
use crate::{Error, Result};

/// Run the batches command
pub async fn run_batches(args: BatchesArgs) -> Result<()> {
    shared::setup_logging(&args.global)?;
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = shared::load_configuration(&args.global)?;
    let scanner = BatchScanner::new(&config.batches.root);
    info!("Scanning batches root {}", scanner.root().display());

    let infos = match &args.run_id {
        Some(run_id) => vec![scanner.collect(run_id)?],
        None => scanner.list_all()?,
    };

    match args.output_format {
        OutputFormat::Human => print_batch_table(&infos),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&infos)
                    .map_err(|e| Error::data_validation(format!("Failed to encode report: {e}")))?
            );
        }
    }

    Ok(())
}

fn print_batch_table(infos: &[BatchInfo]) {
    if infos.is_empty() {
        println!("No batch runs found");
        return;
    }

    println!("\n{}", "Batch Runs".bright_green().bold());
    println!(
        "  {:<38} {:>10} {:>12} {:>6}",
        "RUN ID".bold(),
        "STATUS".bold(),
        "INDICATORS".bold(),
        "LOG".bold()
    );

    for info in infos {
        let status = if info.finished {
            "finished".green()
        } else {
            "running".yellow()
        };
        let log = if info.has_log { "yes" } else { "no" };
        println!(
            "  {:<38} {:>10} {:>12} {:>6}",
            info.run_id, status, info.indicator_count, log
        );
    }
}
