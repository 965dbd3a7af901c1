//! Size and timestamp comparison for determining whether a copy is stale

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;

use crate::error::Result;

/// Snapshot of a file taken at decision time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path the snapshot was taken from
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
}

impl FileRecord {
    /// Build a record from known values
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, size: u64, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            size,
            modified,
        }
    }

    /// Stat a file that must exist
    ///
    /// # Errors
    ///
    /// Returns an error if metadata cannot be read.
    pub fn stat(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for: {}", path.display()))?;

        let modified = metadata
            .modified()
            .with_context(|| format!("Failed to get modification time for: {}", path.display()))?;

        Ok(Self::new(path, metadata.len(), modified))
    }

    /// Stat a file that may be absent
    ///
    /// Returns `Ok(None)` when nothing exists at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the file not existing.
    pub fn probe(path: &Path) -> Result<Option<Self>> {
        match fs::metadata(path) {
            Ok(_) => Self::stat(path).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read metadata for: {}", path.display())),
        }
    }
}

/// Decides whether a destination copy is out of date relative to its source
pub struct StalenessPolicy;

impl StalenessPolicy {
    /// A copy is needed when the destination is absent, differs in size,
    /// or is strictly older than the source.
    #[must_use]
    pub fn needs_copy(source: &FileRecord, destination: Option<&FileRecord>) -> bool {
        match destination {
            None => true,
            Some(dest) => source.size != dest.size || source.modified > dest.modified,
        }
    }
}
