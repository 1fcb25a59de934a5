//! Batch run folder status reporting
//!
//! An external batch runner writes one folder per run under the batches
//! root. Each folder accumulates an output CSV and a debug CSV per
//! indicator, a `batch.log`, and a `batch.tar.gz` archive once the run
//! completes. The scanner reads that layout without consuming it.
//!
//! ## Architecture
//!
//! - [`scanner`] - folder inspection and run listing

pub mod scanner;

#[cfg(test)]
pub mod tests;

pub use scanner::{BatchInfo, BatchScanner};
