//! JSON manifest parsing and loading into the store
//!
//! The manifest is the operator-facing description of the catalog: one
//! entry per indicator, each carrying the pregen parts that bind file
//! columns to time and key metadata. Loading upserts indicators by name
//! and replaces their parts wholesale, so re-running the loader with the
//! same manifest is a no-op.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::services::observation_store::{NewPart, SqliteObservationStore};
use crate::{Error, Result};

/// One pregen part binding in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestPart {
    pub time_type: String,
    pub time_value: String,
    pub key_type: String,
    pub column_name: String,
    pub file_name: String,
}

/// One indicator entry in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestIndicator {
    pub name: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub parts: Vec<ManifestPart>,
}

/// Parsed metadata manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataManifest {
    pub indicators: Vec<ManifestIndicator>,
}

/// Counts reported after a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub indicators_loaded: usize,
    pub parts_loaded: usize,
}

impl MetadataManifest {
    /// Read and parse a manifest file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::file_open(path.display().to_string(), e))?;

        let manifest: Self = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            Error::metadata(
                path.display().to_string(),
                format!("Malformed manifest JSON: {e}"),
            )
        })?;

        manifest.validate(path)?;
        debug!(
            "Parsed manifest {} with {} indicators",
            path.display(),
            manifest.indicators.len()
        );
        Ok(manifest)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let mut seen = HashSet::new();
        for indicator in &self.indicators {
            if indicator.name.trim().is_empty() {
                return Err(Error::metadata(
                    path.display().to_string(),
                    "Indicator with empty name",
                ));
            }
            if !seen.insert(indicator.name.as_str()) {
                return Err(Error::metadata(
                    path.display().to_string(),
                    format!("Duplicate indicator name '{}'", indicator.name),
                ));
            }
            for part in &indicator.parts {
                if part.column_name.trim().is_empty() || part.file_name.trim().is_empty() {
                    return Err(Error::metadata(
                        path.display().to_string(),
                        format!(
                            "Indicator '{}' has a part with an empty column or file name",
                            indicator.name
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Load every indicator and its parts into the store
    ///
    /// Indicators are upserted by name; parts are replaced wholesale, so
    /// parts absent from the manifest disappear from the store.
    pub fn load_into(&self, store: &SqliteObservationStore) -> Result<LoadSummary> {
        let mut parts_loaded = 0;

        for indicator in &self.indicators {
            let id = store.upsert_indicator(&indicator.name, indicator.file_name.as_deref())?;

            let parts: Vec<NewPart> = indicator
                .parts
                .iter()
                .map(|p| NewPart {
                    time_type: p.time_type.clone(),
                    time_value: p.time_value.clone(),
                    key_type: p.key_type.clone(),
                    column_name: p.column_name.clone(),
                    file_name: p.file_name.clone(),
                })
                .collect();

            parts_loaded += store.replace_parts(id, &parts)?;
            debug!(
                "Loaded indicator '{}' with {} parts",
                indicator.name,
                parts.len()
            );
        }

        info!(
            "Loaded {} indicators, {} parts",
            self.indicators.len(),
            parts_loaded
        );
        Ok(LoadSummary {
            indicators_loaded: self.indicators.len(),
            parts_loaded,
        })
    }
}
