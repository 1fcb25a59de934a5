//! Core pregen import implementation
//!
//! This module provides the import orchestration: opening each part's bound
//! file, matching its column against the header, classifying matched cells
//! and replacing the indicator's stored observations wholesale.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::classify::classify_cell;
use crate::app::adapters::filesystem::FileResolver;
use crate::app::models::{
    ImportOutcome, ImportReport, ImportStats, Indicator, Observation, PregenPart,
};
use crate::app::services::observation_store::SqliteObservationStore;
use crate::{Error, Result};

/// Importer converting pregen column bindings into stored observations
///
/// The importer is synchronous and blocking per indicator. Callers must not
/// run two imports of the same indicator concurrently; imports of different
/// indicators are independent.
pub struct PregenImporter {
    resolver: Arc<dyn FileResolver>,
    store: Arc<SqliteObservationStore>,
}

impl PregenImporter {
    /// Create a new importer with its file resolver and store dependencies
    pub fn new(resolver: Arc<dyn FileResolver>, store: Arc<SqliteObservationStore>) -> Self {
        Self { resolver, store }
    }

    /// Import all parts of one indicator, replacing its observations
    ///
    /// An empty part list returns `NoParts` without touching the resolver.
    /// A file that cannot be opened aborts the whole import with
    /// `Error::FileOpen`; no remaining parts are processed and the store is
    /// left untouched. A part whose column is absent from its file header
    /// contributes nothing and processing continues. Only a non-empty
    /// accumulation replaces the stored observations, so a run that matched
    /// nothing never destroys prior data.
    pub fn import_for_indicator(
        &self,
        indicator: &Indicator,
        parts: &[PregenPart],
    ) -> Result<ImportReport> {
        if parts.is_empty() {
            debug!("Indicator '{}' has no parts, nothing to import", indicator.name);
            return Ok(ImportReport {
                outcome: ImportOutcome::NoParts,
                stats: ImportStats::default(),
            });
        }

        info!(
            "Importing indicator '{}' from {} part(s)",
            indicator.name,
            parts.len()
        );

        let mut stats = ImportStats::default();
        let mut observations = Vec::new();

        for part in parts {
            self.collect_part(indicator, part, &mut observations, &mut stats)?;
        }

        if observations.is_empty() {
            warn!(
                "No columns matched for indicator '{}', prior data left untouched",
                indicator.name
            );
            return Ok(ImportReport {
                outcome: ImportOutcome::NoMatchingColumns,
                stats,
            });
        }

        let count = self
            .store
            .replace_observations(indicator.id, &observations)?;
        info!(
            "Replaced observations for indicator '{}': {} written",
            indicator.name, count
        );

        Ok(ImportReport {
            outcome: ImportOutcome::Replaced { count },
            stats,
        })
    }

    /// Read one part's file and append its matched-cell observations
    fn collect_part(
        &self,
        indicator: &Indicator,
        part: &PregenPart,
        observations: &mut Vec<Observation>,
        stats: &mut ImportStats,
    ) -> Result<()> {
        let reader = self.resolver.open(&part.file_name)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(|e| {
            Error::csv_parsing(
                part.file_name.clone(),
                "Failed to read CSV header row",
                Some(e),
            )
        })?;

        let column_index = headers.iter().position(|h| h == part.column_name);
        let Some(col) = column_index else {
            debug!(
                "Column '{}' not found in '{}', skipping part",
                part.column_name, part.file_name
            );
            stats.parts_skipped += 1;
            return Ok(());
        };

        stats.parts_matched += 1;

        for record in csv_reader.records() {
            let record = record.map_err(|e| {
                Error::csv_parsing(part.file_name.clone(), "Malformed CSV record", Some(e))
            })?;
            stats.rows_read += 1;

            let val = record.get(col).ok_or_else(|| {
                Error::csv_parsing(
                    part.file_name.clone(),
                    format!("Row is missing column index {}", col),
                    None,
                )
            })?;

            observations.push(Observation {
                indicator_id: indicator.id,
                time_type: part.time_type.clone(),
                time_key: part.time_value.clone(),
                key_unit_type: part.key_type.clone(),
                key_value: val.to_string(),
                value: classify_cell(val),
            });
            stats.observations_built += 1;
        }

        Ok(())
    }
}
