//! Data models for indicator loading
//!
//! This module contains the core data structures for representing catalog
//! indicators, their pregen column bindings, and the observation records
//! produced by an import run.

use crate::constants;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// Catalog Metadata Structures
// =============================================================================

/// A catalog indicator
///
/// Indicators whose `file_name` is populated are sourced from pre-generated
/// CSV files; indicators without one are computed elsewhere and are never
/// touched by an import run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Indicator {
    /// Store-assigned identifier
    pub id: i64,

    /// Unique indicator name (e.g., "population_density")
    pub name: String,

    /// Default pregen file for this indicator, if it is pregen-sourced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl Indicator {
    /// Check whether this indicator is sourced from pregen CSV files
    pub fn is_pregen_sourced(&self) -> bool {
        self.file_name.is_some()
    }
}

/// One column binding for an indicator
///
/// A part names a column inside a pregen CSV file and carries the time and
/// key attributes stamped onto every observation built from that column.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PregenPart {
    /// Store-assigned identifier
    pub id: i64,

    /// Owning indicator
    pub indicator_id: i64,

    /// Time dimension type (e.g., "year")
    pub time_type: String,

    /// Time key stamped onto observations from this part (e.g., "2019")
    pub time_value: String,

    /// Key unit type stamped onto observations (e.g., "county")
    pub key_type: String,

    /// Header column this part binds to
    pub column_name: String,

    /// CSV file this part reads, relative to the pregen root
    pub file_name: String,

    /// Ordering of parts within an indicator
    pub position: i64,
}

impl PregenPart {
    /// Validate part data for required fields
    pub fn validate(&self) -> Result<()> {
        if self.column_name.trim().is_empty() {
            return Err(Error::data_validation(
                "Part column name cannot be empty".to_string(),
            ));
        }

        if self.file_name.trim().is_empty() {
            return Err(Error::data_validation(
                "Part file name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Observation Structures
// =============================================================================

/// Classification result for a single CSV cell
///
/// Exactly one representation exists per cell. A cell that fails numeric
/// parsing is a normal text observation, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "data_type", content = "value")]
pub enum CellValue {
    /// Cell parsed as a decimal floating-point literal
    #[serde(rename = "numeric")]
    Numeric(f64),

    /// Cell kept as raw text
    #[serde(rename = "string")]
    Text(String),
}

impl CellValue {
    /// Stored data type tag for this value
    pub fn data_type(&self) -> &'static str {
        match self {
            CellValue::Numeric(_) => constants::DATA_TYPE_NUMERIC,
            CellValue::Text(_) => constants::DATA_TYPE_STRING,
        }
    }

    /// Numeric value if this cell classified as numeric
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            CellValue::Numeric(v) => Some(*v),
            CellValue::Text(_) => None,
        }
    }

    /// Text value if this cell classified as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Numeric(_) => None,
            CellValue::Text(s) => Some(s),
        }
    }
}

impl FromStr for CellValue {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.parse::<f64>() {
            Ok(v) => Ok(CellValue::Numeric(v)),
            Err(_) => Ok(CellValue::Text(raw.to_string())),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Numeric(v) => write!(f, "{}", v),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A single time-keyed observation record
///
/// Observations are built transiently during an import run and written to
/// the store as one batch; they are never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Owning indicator
    pub indicator_id: i64,

    /// Time dimension type copied from the binding
    pub time_type: String,

    /// Time key copied from the binding's time value
    pub time_key: String,

    /// Key unit type copied from the binding's key type
    pub key_unit_type: String,

    /// Raw text of the matched cell
    pub key_value: String,

    /// Classified cell value
    pub value: CellValue,
}

// =============================================================================
// Import Result Structures
// =============================================================================

/// Discriminated result of an import run for one indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImportOutcome {
    /// Observations were replaced wholesale
    Replaced {
        /// Number of observations written
        count: usize,
    },

    /// The indicator has no parts; nothing was read or written
    NoParts,

    /// No part matched a header column (or matched files had no data rows);
    /// prior observations were left untouched
    NoMatchingColumns,
}

impl ImportOutcome {
    /// Whether this outcome wrote observations to the store
    pub fn applied(&self) -> bool {
        matches!(self, ImportOutcome::Replaced { .. })
    }
}

impl std::fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportOutcome::Replaced { count } => write!(f, "replaced {} observations", count),
            ImportOutcome::NoParts => write!(f, "no parts defined"),
            ImportOutcome::NoMatchingColumns => write!(f, "no matching columns"),
        }
    }
}

/// Counters accumulated during a single import run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportStats {
    /// Parts whose column was found in its file header
    pub parts_matched: usize,

    /// Parts whose column was absent from the header
    pub parts_skipped: usize,

    /// Data rows read across all matched parts
    pub rows_read: usize,

    /// Observations built from matched cells
    pub observations_built: usize,
}

/// Outcome plus counters for one indicator's import run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    /// What happened to the indicator's stored observations
    pub outcome: ImportOutcome,

    /// Processing counters for the run
    pub stats: ImportStats,
}
