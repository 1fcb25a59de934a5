//! Pregen CSV importer for indicator observations
//!
//! This module converts the column bindings of an indicator into time-keyed
//! observation records and replaces the indicator's stored observations in a
//! single transaction.
//!
//! ## Architecture
//!
//! The importer is organized into logical components:
//! - [`importer`] - Core import orchestration and header matching
//! - [`classify`] - Cell classification into numeric or text values
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use indicator_loader::app::adapters::filesystem::PregenDirResolver;
//! use indicator_loader::app::services::observation_store::SqliteObservationStore;
//! use indicator_loader::app::services::pregen_importer::PregenImporter;
//!
//! # fn example() -> indicator_loader::Result<()> {
//! let resolver = Arc::new(PregenDirResolver::new("/data/pregen"));
//! let store = Arc::new(SqliteObservationStore::open("/data/indicators.db")?);
//! let importer = PregenImporter::new(resolver, store.clone());
//!
//! let indicator = store.find_indicator("population_density")?;
//! let parts = store.parts_for(indicator.id)?;
//! let report = importer.import_for_indicator(&indicator, &parts)?;
//!
//! println!("{}", report.outcome);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod importer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use classify::classify_cell;
pub use importer::PregenImporter;
