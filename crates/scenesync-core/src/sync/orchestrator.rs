//! Sync orchestration - walks a source tree and mirrors it into a destination

use std::path::Path;

use tracing::warn;

use super::SyncResult;
use super::actions::{DecisionResolver, SkipReason, SyncDecision};
use super::executor::CopyExecutor;
use crate::scanner::{ContentTree, ExclusionPolicy};

/// Mirrors source files into a destination root, one file at a time
///
/// Files are never deleted from the destination.
pub struct TreeSynchronizer {
    policy: ExclusionPolicy,
    executor: CopyExecutor,
}

impl TreeSynchronizer {
    /// Create a synchronizer with the given exclusion policy
    #[must_use]
    pub const fn new(policy: ExclusionPolicy, dry_run: bool) -> Self {
        Self {
            policy,
            executor: CopyExecutor::new(dry_run),
        }
    }

    /// Whether runs only report what they would do
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.executor.is_dry_run()
    }

    /// Mirror every eligible file under `source_root` into `dest_root`
    ///
    /// A missing source root yields zero counts with `missing_source` set.
    /// Per-file failures are counted and the walk continues.
    #[must_use]
    pub fn sync(&self, source_root: &Path, dest_root: &Path) -> SyncResult {
        let mut result = SyncResult::default();

        if !source_root.is_dir() {
            warn!("Skipping {} (not found)", source_root.display());
            result.missing_source = Some(source_root.to_path_buf());
            return result;
        }

        let listing = ContentTree::new(source_root, &self.policy).list();

        for warning in listing.warnings {
            warn!("  [FAIL] {warning}");
            result.failed += 1;
            result.errors.push(warning);
        }

        let excluded = SyncDecision::Skip(SkipReason::Excluded);
        for rel_path in &listing.excluded {
            let source = source_root.join(rel_path);
            let dest = dest_root.join(rel_path);
            self.executor
                .apply(&excluded, &source, &dest, rel_path, &mut result);
        }

        for rel_path in &listing.files {
            let source = source_root.join(rel_path);
            let dest = dest_root.join(rel_path);

            let decision = DecisionResolver::decide(&source, &dest);
            self.executor
                .apply(&decision, &source, &dest, rel_path, &mut result);
        }

        result
    }

    /// Copy a single file into `dest_dir` under its own name
    ///
    /// Used for build artifacts that live outside any synced tree, so the
    /// exclusion policy does not apply. A missing source yields zero counts
    /// with `missing_source` set.
    #[must_use]
    pub fn sync_file(&self, source: &Path, dest_dir: &Path) -> SyncResult {
        let mut result = SyncResult::default();

        let Some(name) = source.file_name().filter(|_| source.is_file()) else {
            warn!("  [SKIP] {} not found", source.display());
            result.missing_source = Some(source.to_path_buf());
            return result;
        };

        let label = Path::new(name);
        let dest = dest_dir.join(name);

        let decision = DecisionResolver::decide(source, &dest);
        self.executor
            .apply(&decision, source, &dest, label, &mut result);

        result
    }
}
