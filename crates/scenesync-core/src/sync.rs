//! One-directional synchronization engine
//!
//! This module mirrors a canonical source tree into a destination root.
//! Each file is checked against the exclusion policy, then the staleness
//! policy, and copied with its modification time when out of date.
//! Destination files with no source counterpart are left in place.

mod actions;
mod executor;
mod orchestrator;
mod reporting;

use std::path::PathBuf;

pub use actions::{DecisionResolver, SkipReason, SyncDecision};
pub use executor::CopyExecutor;
pub use orchestrator::TreeSynchronizer;
pub use reporting::SyncReporter;

/// Synchronization result with statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResult {
    /// Files copied (or that would be copied in a dry run)
    pub copied: usize,
    /// Files already up to date
    pub skipped: usize,
    /// Files that could not be evaluated or copied
    pub failed: usize,
    /// One message per failure, naming the path
    pub errors: Vec<String>,
    /// Set when the source root (or artifact) did not exist
    pub missing_source: Option<PathBuf>,
}

impl SyncResult {
    /// Files that were considered (excluded files are never counted)
    #[must_use]
    pub const fn total_files(&self) -> usize {
        self.copied + self.skipped + self.failed
    }

    /// Whether sync was successful (no failures)
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Add another result's counts and errors into this one
    pub fn absorb(&mut self, other: &Self) {
        self.copied += other.copied;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.errors.extend(other.errors.iter().cloned());
    }
}
