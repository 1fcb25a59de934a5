//! Shared test fixtures for metadata loader tests

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

pub mod loader_tests;

/// Write manifest JSON to a temp file, returning the dir and path
pub fn write_manifest(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("manifest.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    (dir, path)
}
