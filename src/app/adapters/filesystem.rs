//! Filesystem access for pre-generated CSV files
//!
//! Pregen parts carry file names relative to a configured root directory.
//! The resolver owns all path joining so the importer never touches paths
//! directly and tests can substitute an in-memory implementation.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::{Error, Result};

/// Capability for opening a part's bound file by its relative name
pub trait FileResolver: Send + Sync {
    /// Open a readable stream for the given relative file name
    fn open(&self, file_name: &str) -> Result<Box<dyn Read + Send>>;
}

/// Resolver that joins relative names onto a pregen root directory
#[derive(Debug, Clone)]
pub struct PregenDirResolver {
    root: PathBuf,
}

impl PregenDirResolver {
    /// Create a resolver rooted at the given pregen directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory this resolver joins names onto
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl FileResolver for PregenDirResolver {
    fn open(&self, file_name: &str) -> Result<Box<dyn Read + Send>> {
        let path = self.root.join(file_name);
        let file =
            File::open(&path).map_err(|e| Error::file_open(path.display().to_string(), e))?;
        Ok(Box::new(file))
    }
}
