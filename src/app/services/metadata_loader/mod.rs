//! Manifest-driven indicator metadata loading
//!
//! Operators describe indicators and their pregen parts in a JSON manifest.
//! The loader validates the manifest and writes it into the observation
//! store, replacing each indicator's parts wholesale.
//!
//! ## Architecture
//!
//! - [`loader`] - manifest parsing and store loading
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use indicator_loader::app::services::metadata_loader::MetadataManifest;
//! use indicator_loader::app::services::observation_store::SqliteObservationStore;
//!
//! # fn main() -> indicator_loader::Result<()> {
//! let store = Arc::new(SqliteObservationStore::open("indicators.db")?);
//! let manifest = MetadataManifest::from_path("manifest.json")?;
//! let summary = manifest.load_into(&store)?;
//! println!("Loaded {} indicators", summary.indicators_loaded);
//! # Ok(())
//! # }
//! ```

pub mod loader;

#[cfg(test)]
pub mod tests;

pub use loader::{LoadSummary, ManifestIndicator, ManifestPart, MetadataManifest};
