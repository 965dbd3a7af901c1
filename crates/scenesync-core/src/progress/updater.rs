//! Scan, reconcile and persist in one pass

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};

use super::document::ProgressDocument;
use super::reconciler::{ProgressReconciler, ReconcileMode, Reconciliation};
use crate::comparison::DiffGenerator;
use crate::error::Result;
use crate::scanner::DiscoverableScanner;

/// What one update run did
#[derive(Debug, Clone, Default)]
pub struct ProgressUpdate {
    /// Where the document lives
    pub document_path: PathBuf,
    /// Reconciled groups plus added/removed keys
    pub reconciliation: Reconciliation,
    /// Document text before the run (empty when it did not exist)
    pub before: String,
    /// Document text the run produced
    pub after: String,
    /// Whether the document was written
    pub written: bool,
    /// Set when the data root did not exist
    pub missing_source: Option<PathBuf>,
}

impl ProgressUpdate {
    /// Whether the document content differs from what was on disk
    #[must_use]
    pub fn changed(&self) -> bool {
        self.before != self.after
    }

    /// Unified diff from the old document to the new one
    #[must_use]
    pub fn diff(&self, color: bool) -> String {
        let label = self.document_path.display().to_string();
        DiffGenerator::generate(&self.before, &self.after, &label, color)
    }
}

/// Brings the progress document in line with the data root
pub struct ProgressUpdater<'a> {
    data_root: &'a Path,
    document: &'a Path,
    mode: ReconcileMode,
    dry_run: bool,
}

impl<'a> ProgressUpdater<'a> {
    /// Create an updater; `document` is relative to `data_root`
    #[must_use]
    pub const fn new(data_root: &'a Path, document: &'a Path) -> Self {
        Self {
            data_root,
            document,
            mode: ReconcileMode::Preserve,
            dry_run: false,
        }
    }

    /// Select the reconcile mode
    #[must_use]
    pub const fn mode(mut self, mode: ReconcileMode) -> Self {
        self.mode = mode;
        self
    }

    /// Compute and report without writing
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the update
    ///
    /// A missing data root is reported through `missing_source` and leaves
    /// the document alone. An unchanged document is not rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing document is unreadable or malformed,
    /// or if writing the new one fails.
    pub fn run(&self) -> Result<ProgressUpdate> {
        let document_path = self.data_root.join(self.document);

        if !self.data_root.is_dir() {
            warn!("Skipping progress update: {} not found", self.data_root.display());
            return Ok(ProgressUpdate {
                document_path,
                missing_source: Some(self.data_root.to_path_buf()),
                ..ProgressUpdate::default()
            });
        }

        let existing = ProgressDocument::read_text(&document_path)?;
        let current = match &existing {
            Some(text) => ProgressDocument::parse_at(&document_path, text)?,
            None => ProgressDocument::new(),
        };
        let before = existing.unwrap_or_default();

        let defaults = DiscoverableScanner::new(self.data_root)
            .excluding(self.document)
            .scan();
        debug!("Found {} discoverable scenes", defaults.len());

        let reconciliation =
            ProgressReconciler::reconcile(&defaults, &current.flatten(), self.mode);

        let updated = current.with_groups(&reconciliation.groups);
        let after = updated.to_json_string()?;

        let mut update = ProgressUpdate {
            document_path,
            reconciliation,
            before,
            after,
            written: false,
            missing_source: None,
        };

        if !update.changed() {
            debug!("Progress document up to date");
        } else if self.dry_run {
            info!("  [DRY] {}", update.document_path.display());
        } else {
            updated.save(&update.document_path).with_context(|| {
                format!(
                    "Failed to write progress document: {}",
                    update.document_path.display()
                )
            })?;
            info!("  {}", update.document_path.display());
            update.written = true;
        }

        Ok(update)
    }
}
