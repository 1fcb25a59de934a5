//! Application constants for the indicator loader
//!
//! This module contains configuration constants, default values, and
//! filename markers used throughout the indicator loader application.

// =============================================================================
// File and Directory Constants
// =============================================================================

/// Default filename of the observation store database
pub const DEFAULT_STORE_FILENAME: &str = "indicators.db";

/// Default directory name holding pre-generated CSV files
pub const DEFAULT_PREGEN_DIR_NAME: &str = "pregen";

/// Default directory name holding batch run folders
pub const DEFAULT_BATCHES_DIR_NAME: &str = "batches";

/// Default configuration filename looked up in the config directory
pub const CONFIG_FILENAME: &str = "config.toml";

/// Application directory name used under the platform config/data roots
pub const APP_DIR_NAME: &str = "indicator-loader";

/// Archive created when a batch run has finished
pub const BATCH_ARCHIVE_FILENAME: &str = "batch.tar.gz";

/// Log file written by a batch run while it executes
pub const BATCH_LOG_FILENAME: &str = "batch.log";

/// Extension of pre-generated data files inside a batch folder
pub const CSV_EXTENSION: &str = "csv";

/// Batch runs emit two CSV files per indicator (data plus metadata)
pub const CSV_FILES_PER_INDICATOR: usize = 2;

// =============================================================================
// Observation Data Type Constants
// =============================================================================

/// Stored data type tag for observations whose value parsed as a number
pub const DATA_TYPE_NUMERIC: &str = "numeric";

/// Stored data type tag for observations kept as raw text
pub const DATA_TYPE_STRING: &str = "string";

// =============================================================================
// Processing Configuration Defaults
// =============================================================================

/// Upper bound on parallel import workers
pub const MAX_PARALLEL_WORKERS: usize = 100;

// =============================================================================
// Helper Functions
// =============================================================================

/// Default number of parallel import workers, one per CPU core
pub fn default_parallel_workers() -> usize {
    num_cpus::get().clamp(1, MAX_PARALLEL_WORKERS)
}

/// Check if a directory entry filename is a pre-generated CSV file
pub fn is_csv_filename(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION))
        .unwrap_or(false)
}

/// Number of indicators represented by a count of CSV files in a batch folder
pub fn indicators_from_csv_count(csv_files: usize) -> usize {
    csv_files / CSV_FILES_PER_INDICATOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_filename_detection() {
        assert!(is_csv_filename("population_density.csv"));
        assert!(is_csv_filename("EXPORT.CSV"));
        assert!(!is_csv_filename("batch.tar.gz"));
        assert!(!is_csv_filename("batch.log"));
        assert!(!is_csv_filename("no_extension"));
    }

    #[test]
    fn test_default_parallel_workers_in_range() {
        let workers = default_parallel_workers();
        assert!(workers >= 1);
        assert!(workers <= MAX_PARALLEL_WORKERS);
    }

    #[test]
    fn test_indicators_from_csv_count() {
        assert_eq!(indicators_from_csv_count(0), 0);
        assert_eq!(indicators_from_csv_count(2), 1);
        assert_eq!(indicators_from_csv_count(10), 5);
        // An odd count means a stray file; integer division ignores it
        assert_eq!(indicators_from_csv_count(7), 3);
    }
}
