//! Indicator Loader Library
//!
//! A Rust library for loading pre-generated CSV observation data into a
//! data-catalog indicator store.
//!
//! This library provides tools for:
//! - Resolving and reading per-part pre-generated CSV files
//! - Matching header columns against registered indicator parts
//! - Classifying cell values as numeric or textual observations
//! - Replacing an indicator's stored observations in a single transaction
//! - Loading indicator metadata manifests
//! - Inspecting batch run folders for completion status
//! - Comprehensive error handling and recovery

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch_status;
        pub mod metadata_loader;
        pub mod observation_store;
        pub mod pregen_importer;
    }
    pub mod adapters {
        pub mod filesystem;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CellValue, ImportOutcome, Indicator, Observation, PregenPart};
pub use config::Config;

/// Result type alias for the indicator loader
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for indicator loading operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A pregen data file could not be opened
    #[error("Unable to open pregen file '{path}'")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Observation store error
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// Metadata manifest error
    #[error("Metadata error in '{file}': {message}")]
    Metadata { file: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Indicator not found
    #[error("Indicator not found: {name}")]
    IndicatorNotFound { name: String },

    /// Batch run folder not found
    #[error("Batch not found: {run_id}")]
    BatchNotFound { run_id: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file open error carrying the offending path
    pub fn file_open(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a storage error with context
    pub fn storage(message: impl Into<String>, source: Option<rusqlite::Error>) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }

    /// Create a metadata manifest error
    pub fn metadata(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Metadata {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an indicator not found error
    pub fn indicator_not_found(name: impl Into<String>) -> Self {
        Self::IndicatorNotFound { name: name.into() }
    }

    /// Create a batch not found error
    pub fn batch_not_found(run_id: impl Into<String>) -> Self {
        Self::BatchNotFound {
            run_id: run_id.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Storage {
            message: "SQLite operation failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
