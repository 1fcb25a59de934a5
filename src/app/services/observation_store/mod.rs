//! SQLite observation store
//!
//! This module provides the embedded storage gateway for the indicator
//! catalog: indicator and part metadata plus the observation records
//! produced by import runs.
//!
//! ## Architecture
//!
//! - [`store`] - Connection handling, schema migration and all queries
//!
//! The store wraps a single SQLite connection behind a mutex; replacement
//! writes run inside one transaction so partial imports are never visible.

pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use store::{NewPart, SqliteObservationStore};
