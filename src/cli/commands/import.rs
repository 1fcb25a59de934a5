//! Import command implementation
//!
//! Orchestrates a full pregen import run: selects target indicators,
//! fans the per-indicator work out across a bounded worker pool, and
//! reports a run summary. Each indicator is imported independently, so a
//! bad pregen file fails that indicator without aborting the rest.

use std::sync::Arc;
use std::time::Instant;

use colored::*;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::app::adapters::filesystem::PregenDirResolver;
use crate::app::models::{ImportOutcome, Indicator, PregenPart};
use crate::app::services::observation_store::SqliteObservationStore;
use crate::app::services::pregen_importer::PregenImporter;
use crate::cli::args::{ImportArgs, OutputFormat};
use crate::cli::commands::shared;
use crate::{Error, Result};

/// Per-indicator result line in the run summary
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorResult {
    pub name: String,
    pub status: String,
    pub observations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Aggregate statistics for one import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportRunSummary {
    pub indicators_total: usize,
    pub replaced: usize,
    pub no_parts: usize,
    pub no_matching_columns: usize,
    pub failed: usize,
    pub observations_written: usize,
    pub elapsed_seconds: f64,
    pub dry_run: bool,
    pub results: Vec<IndicatorResult>,
}

/// Run the import command
pub async fn run_import(args: ImportArgs) -> Result<()> {
    let start_time = Instant::now();

    shared::setup_logging(&args.global)?;
    info!("Starting pregen import");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = shared::load_configuration(&args.global)?;
    let store = shared::open_store(&config)?;

    let targets = select_targets(&store, args.get_indicators())?;
    info!("Importing {} indicators", targets.len());

    if args.dry_run {
        let summary = run_dry_run(&targets, start_time);
        report_summary(&args, &summary)?;
        return Ok(());
    }

    let workers = args
        .workers
        .unwrap_or(config.performance.parallel_workers)
        .max(1);
    debug!("Using {} parallel workers", workers);

    let resolver = Arc::new(PregenDirResolver::new(&config.pregen.root));
    let importer = Arc::new(PregenImporter::new(resolver, store));

    let progress_bar = if args.global.show_progress() && !targets.is_empty() {
        Some(shared::create_progress_bar(
            targets.len() as u64,
            "Importing indicators",
        ))
    } else {
        None
    };

    let mut summary = ImportRunSummary {
        indicators_total: targets.len(),
        ..Default::default()
    };

    let pb = progress_bar.clone();
    let results: Vec<_> = stream::iter(targets)
        .map(|(indicator, parts)| {
            let importer = importer.clone();
            let pb = pb.clone();
            async move {
                let target = indicator.clone();
                let joined = tokio::task::spawn_blocking(move || {
                    importer.import_for_indicator(&indicator, &parts)
                })
                .await;
                let outcome = match joined {
                    Ok(report) => report,
                    Err(e) => Err(Error::processing_interrupted(format!(
                        "Import task for '{}' failed: {}",
                        target.name, e
                    ))),
                };
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                (target, outcome)
            }
        })
        .buffer_unordered(workers)
        .collect()
        .await;

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Import complete");
    }

    for (indicator, outcome) in results {
        match outcome {
            Ok(report) => {
                match report.outcome {
                    ImportOutcome::Replaced { count } => {
                        summary.replaced += 1;
                        summary.observations_written += count;
                        info!(
                            "Imported {}: {} observations from {} parts",
                            indicator.name, count, report.stats.parts_matched
                        );
                    }
                    ImportOutcome::NoParts => {
                        summary.no_parts += 1;
                        debug!("Indicator {} has no pregen parts", indicator.name);
                    }
                    ImportOutcome::NoMatchingColumns => {
                        summary.no_matching_columns += 1;
                        warn!(
                            "No pregen columns matched for {}; prior data left in place",
                            indicator.name
                        );
                    }
                }
                summary.results.push(IndicatorResult {
                    name: indicator.name,
                    status: report.outcome.to_string(),
                    observations: report.stats.observations_built,
                    message: None,
                });
            }
            Err(e) => {
                error!("Failed to import {}: {}", indicator.name, e);
                if shared::is_critical_error(&e) {
                    return Err(e);
                }
                summary.failed += 1;
                summary.results.push(IndicatorResult {
                    name: indicator.name,
                    status: "failed".to_string(),
                    observations: 0,
                    message: Some(e.to_string()),
                });
            }
        }
    }

    summary.results.sort_by(|a, b| a.name.cmp(&b.name));
    summary.elapsed_seconds = start_time.elapsed().as_secs_f64();

    report_summary(&args, &summary)?;
    Ok(())
}

/// Resolve the indicators and parts this run will touch
///
/// With an explicit name list every name must exist, and named indicators
/// are kept even without parts so the summary can report them as NoParts.
/// Without one, every indicator with at least one registered part is
/// selected.
fn select_targets(
    store: &SqliteObservationStore,
    names: Option<Vec<String>>,
) -> Result<Vec<(Indicator, Vec<PregenPart>)>> {
    let explicit = names.is_some();
    let indicators = match names {
        Some(names) => {
            let mut out = Vec::with_capacity(names.len());
            for name in names {
                out.push(store.find_indicator(&name)?);
            }
            out
        }
        None => store.list_indicators()?,
    };

    let mut targets = Vec::new();
    for indicator in indicators {
        let parts = store.parts_for(indicator.id)?;
        if parts.is_empty() && !explicit {
            debug!("Skipping {}: no pregen parts registered", indicator.name);
            continue;
        }
        targets.push((indicator, parts));
    }
    Ok(targets)
}

/// List what a real run would import without touching files or the store
fn run_dry_run(
    targets: &[(Indicator, Vec<PregenPart>)],
    start_time: Instant,
) -> ImportRunSummary {
    info!("Performing dry run, nothing will be written");

    let mut summary = ImportRunSummary {
        indicators_total: targets.len(),
        dry_run: true,
        ..Default::default()
    };

    for (indicator, parts) in targets {
        if parts.is_empty() {
            summary.no_parts += 1;
        }
        info!(
            "Would import {}: {} parts from {:?}",
            indicator.name,
            parts.len(),
            parts
                .iter()
                .map(|p| p.file_name.as_str())
                .collect::<Vec<_>>()
        );
        summary.results.push(IndicatorResult {
            name: indicator.name.clone(),
            status: format!("would import {} parts", parts.len()),
            observations: 0,
            message: None,
        });
    }

    summary.elapsed_seconds = start_time.elapsed().as_secs_f64();
    summary
}

/// Print the run summary in the requested format
fn report_summary(args: &ImportArgs, summary: &ImportRunSummary) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => print_human_summary(summary),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(summary)
                    .map_err(|e| Error::data_validation(format!("Failed to encode summary: {e}")))?
            );
        }
    }
    Ok(())
}

fn print_human_summary(summary: &ImportRunSummary) {
    let title = if summary.dry_run {
        "Import Dry Run"
    } else {
        "Import Summary"
    };
    println!("\n{}", title.bright_green().bold());

    println!(
        "  Indicators:   {}",
        summary.indicators_total.to_string().bright_white().bold()
    );
    if !summary.dry_run {
        println!(
            "  Replaced:     {}",
            summary.replaced.to_string().bright_white().bold()
        );
        println!(
            "  Observations: {}",
            summary
                .observations_written
                .to_string()
                .bright_white()
                .bold()
        );
    }
    if summary.no_parts > 0 {
        println!("  No parts:     {}", summary.no_parts);
    }
    if summary.no_matching_columns > 0 {
        println!(
            "  No columns:   {}",
            summary.no_matching_columns.to_string().yellow()
        );
    }
    if summary.failed > 0 {
        println!(
            "  Failed:       {}",
            summary.failed.to_string().bright_red().bold()
        );
        for result in summary.results.iter().filter(|r| r.status == "failed") {
            if let Some(message) = &result.message {
                println!("    {} {}", result.name.bright_red(), message);
            }
        }
    }
    println!("  Elapsed:      {:.2}s", summary.elapsed_seconds);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::observation_store::NewPart;

    fn store_with_catalog() -> Arc<SqliteObservationStore> {
        let store = Arc::new(SqliteObservationStore::open_in_memory().unwrap());
        let rate = store.upsert_indicator("rate", Some("rates.csv")).unwrap();
        store.upsert_indicator("computed", None).unwrap();
        store
            .replace_parts(
                rate,
                &[NewPart {
                    time_type: "year".to_string(),
                    time_value: "2019".to_string(),
                    key_type: "county".to_string(),
                    column_name: "rate".to_string(),
                    file_name: "rates.csv".to_string(),
                }],
            )
            .unwrap();
        store
    }

    #[test]
    fn test_select_targets_defaults_to_part_bearing_indicators() {
        let store = store_with_catalog();
        let targets = select_targets(&store, None).unwrap();

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].0.name, "rate");
        assert_eq!(targets[0].1.len(), 1);
    }

    #[test]
    fn test_select_targets_keeps_named_partless_indicators() {
        let store = store_with_catalog();
        let targets =
            select_targets(&store, Some(vec!["computed".to_string()])).unwrap();

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].0.name, "computed");
        assert!(targets[0].1.is_empty());
    }

    #[test]
    fn test_select_targets_by_name() {
        let store = store_with_catalog();
        let targets = select_targets(&store, Some(vec!["rate".to_string()])).unwrap();

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].0.name, "rate");
    }

    #[test]
    fn test_select_targets_unknown_name_fails() {
        let store = store_with_catalog();
        let err = select_targets(&store, Some(vec!["absent".to_string()])).unwrap_err();
        assert!(matches!(err, Error::IndicatorNotFound { .. }));
    }

    #[test]
    fn test_dry_run_counts_partless_indicators() {
        let store = store_with_catalog();
        let targets = select_targets(
            &store,
            Some(vec!["rate".to_string(), "computed".to_string()]),
        )
        .unwrap();

        let summary = run_dry_run(&targets, Instant::now());
        assert!(summary.dry_run);
        assert_eq!(summary.indicators_total, 2);
        assert_eq!(summary.no_parts, 1);
        assert_eq!(summary.observations_written, 0);
    }
}
