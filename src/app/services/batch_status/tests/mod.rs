//! Shared test fixtures for batch status tests

use std::path::Path;

use tempfile::TempDir;


/// Create a run folder under the root with the given file names
pub fn create_run_dir(root: &Path, run_id: &str, files: &[&str]) {
    let dir = root.join(run_id);
    std::fs::create_dir_all(&dir).unwrap();
    for name in files {
        std::fs::write(dir.join(name), b"x").unwrap();
    }
}

pub fn temp_root() -> TempDir {
    TempDir::new().unwrap()
}
