//! File copy executor

use std::fs::{self, File};
use std::io;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, info, warn};

use super::SyncResult;
use super::actions::{SkipReason, SyncDecision};
use crate::error::Result;

/// Applies sync decisions to the filesystem and tallies the outcome
pub struct CopyExecutor {
    dry_run: bool,
}

impl CopyExecutor {
    /// Create a new executor
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Whether this executor leaves the filesystem untouched
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Apply a decision for one file
    ///
    /// Excluded files are not counted. Copy failures are counted and logged
    /// but never propagated, so the caller can move on to the next file.
    pub fn apply(
        &self,
        decision: &SyncDecision,
        source: &Path,
        dest: &Path,
        label: &Path,
        result: &mut SyncResult,
    ) {
        match decision {
            SyncDecision::Copy if self.dry_run => {
                info!("  [DRY] {}", label.display());
                result.copied += 1;
            }
            SyncDecision::Copy => match Self::copy_file(source, dest) {
                Ok(()) => {
                    info!("  {}", label.display());
                    result.copied += 1;
                }
                Err(e) => Self::record_failure(label, &format!("{e:#}"), result),
            },
            SyncDecision::Skip(SkipReason::UpToDate) => {
                debug!("  (up-to-date) {}", label.display());
                result.skipped += 1;
            }
            SyncDecision::Skip(SkipReason::Excluded) => {
                debug!("  (excluded) {}", label.display());
            }
            SyncDecision::Fail(reason) => Self::record_failure(label, reason, result),
        }
    }

    fn record_failure(label: &Path, reason: &str, result: &mut SyncResult) {
        warn!("  [FAIL] {}: {reason}", label.display());
        result.failed += 1;
        result.errors.push(format!("{}: {reason}", label.display()));
    }

    /// Copy contents, permissions and modification time
    ///
    /// The destination ends up with the source's size and mtime, so a
    /// subsequent staleness check sees it as up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if any filesystem operation fails.
    pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::copy(source, dest).with_context(|| {
            format!("Failed to copy {} to {}", source.display(), dest.display())
        })?;

        let modified = fs::metadata(source)
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to get modification time for: {}", source.display()))?;

        Self::open_for_times(dest)
            .and_then(|file| file.set_modified(modified))
            .with_context(|| format!("Failed to set modification time on: {}", dest.display()))?;

        Ok(())
    }

    /// Read-only copies reject write handles; a read handle still allows
    /// setting times on platforms where the owner may do so.
    fn open_for_times(path: &Path) -> io::Result<File> {
        match File::options().write(true).open(path) {
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => File::open(path),
            other => other,
        }
    }
}
