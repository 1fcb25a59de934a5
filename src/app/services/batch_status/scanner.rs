//! Batch folder inspection
//!
//! Status is derived entirely from the filesystem: the archive marks a
//! finished run, the CSV count divides down to an indicator count (each
//! indicator produces an output file and a debug file), and the log file
//! is reported so callers can point operators at it.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;
use walkdir::WalkDir;

use crate::constants;
use crate::{Error, Result};

/// Status snapshot of one batch run folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchInfo {
    pub run_id: String,
    pub finished: bool,
    pub indicator_count: usize,
    pub has_log: bool,
}

/// Reads batch run folders under a fixed root
#[derive(Debug, Clone)]
pub struct BatchScanner {
    root: PathBuf,
}

impl BatchScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect status for a single run folder
    pub fn collect(&self, run_id: &str) -> Result<BatchInfo> {
        if Uuid::parse_str(run_id).is_err() {
            warn!("Run id '{}' is not a UUID", run_id);
        }

        let dir = self.root.join(run_id);
        if !dir.is_dir() {
            return Err(Error::batch_not_found(run_id));
        }
        self.collect_dir(run_id, &dir)
    }

    fn collect_dir(&self, run_id: &str, dir: &Path) -> Result<BatchInfo> {
        let mut csv_count = 0;
        let mut finished = false;
        let mut has_log = false;

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                Error::directory_traversal(format!("Failed to read {}", dir.display()), e)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if name == constants::BATCH_ARCHIVE_FILENAME {
                finished = true;
            } else if name == constants::BATCH_LOG_FILENAME {
                has_log = true;
            } else if constants::is_csv_filename(&name) {
                csv_count += 1;
            }
        }

        let info = BatchInfo {
            run_id: run_id.to_string(),
            finished,
            indicator_count: constants::indicators_from_csv_count(csv_count),
            has_log,
        };
        debug!(
            "Batch {}: finished={} indicators={} log={}",
            info.run_id, info.finished, info.indicator_count, info.has_log
        );
        Ok(info)
    }

    /// Status for every run folder under the root, sorted by run id
    ///
    /// Non-directory entries at the root are ignored. A missing root reads
    /// as zero runs rather than an error, matching a runner that has not
    /// produced output yet.
    pub fn list_all(&self) -> Result<Vec<BatchInfo>> {
        if !self.root.is_dir() {
            debug!("Batches root {} does not exist", self.root.display());
            return Ok(Vec::new());
        }

        let mut infos = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                Error::directory_traversal(
                    format!("Failed to read {}", self.root.display()),
                    e,
                )
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let run_id = entry.file_name().to_string_lossy().to_string();
            infos.push(self.collect_dir(&run_id, entry.path())?);
        }

        infos.sort_by(|a, b| a.run_id.cmp(&b.run_id));
        Ok(infos)
    }
}
