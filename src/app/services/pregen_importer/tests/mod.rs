//! Shared test fixtures for pregen importer tests

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::app::adapters::filesystem::FileResolver;
use crate::app::models::{Indicator, PregenPart};
use crate::app::services::observation_store::SqliteObservationStore;
use crate::{Error, Result};

pub mod importer_tests;

/// In-memory resolver backed by a map of file contents
///
/// Counts every `open` call so tests can assert the resolver is never
/// touched for indicators without parts.
pub struct MemoryResolver {
    files: HashMap<String, String>,
    opens: AtomicUsize,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            opens: AtomicUsize::new(0),
        }
    }

    pub fn with_file(mut self, name: &str, contents: &str) -> Self {
        self.files.insert(name.to_string(), contents.to_string());
        self
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl FileResolver for MemoryResolver {
    fn open(&self, file_name: &str) -> Result<Box<dyn Read + Send>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        match self.files.get(file_name) {
            Some(contents) => Ok(Box::new(Cursor::new(contents.clone().into_bytes()))),
            None => Err(Error::file_open(
                file_name.to_string(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such test file"),
            )),
        }
    }
}

/// Create a store with one registered indicator, returning both
pub fn store_with_indicator(name: &str) -> (Arc<SqliteObservationStore>, Indicator) {
    let store = Arc::new(SqliteObservationStore::open_in_memory().unwrap());
    store.upsert_indicator(name, Some("data.csv")).unwrap();
    let indicator = store.find_indicator(name).unwrap();
    (store, indicator)
}

/// Create a test part binding a column in the given file
pub fn create_test_part(indicator_id: i64, column_name: &str, file_name: &str) -> PregenPart {
    PregenPart {
        id: 0,
        indicator_id,
        time_type: "year".to_string(),
        time_value: "2019".to_string(),
        key_type: "county".to_string(),
        column_name: column_name.to_string(),
        file_name: file_name.to_string(),
        position: 0,
    }
}
