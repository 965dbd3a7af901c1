//! Running a deployment plan

use std::path::PathBuf;

use tracing::{info, warn};

use super::plan::{DeployPlan, Stage, StageKind};
use crate::error::{PreconditionError, Result};
use crate::progress::{ProgressDocument, ProgressUpdate, ProgressUpdater, ReconcileMode};
use crate::scanner::ExclusionPolicy;
use crate::sync::{SyncResult, TreeSynchronizer};

/// How one stage ended
#[derive(Debug, Clone)]
pub enum StageResult {
    /// Progress reconciliation finished
    Progress {
        /// Update details
        update: ProgressUpdate,
        /// Mode it ran in
        mode: ReconcileMode,
    },
    /// File copy stage finished
    Files(SyncResult),
    /// The stage could not complete
    Failed(String),
}

/// A stage paired with its result
#[derive(Debug, Clone)]
pub struct StageOutcome {
    /// Stage name
    pub name: String,
    /// Result
    pub result: StageResult,
}

/// Everything a deployment run did
#[derive(Debug, Clone, Default)]
pub struct DeploySummary {
    /// Outcomes in run order
    pub stages: Vec<StageOutcome>,
    /// Whether the run left the filesystem untouched
    pub dry_run: bool,
}

impl DeploySummary {
    /// Copy counts summed over the file stages
    #[must_use]
    pub fn totals(&self) -> SyncResult {
        let mut total = SyncResult::default();
        for stage in &self.stages {
            if let StageResult::Files(result) = &stage.result {
                total.absorb(result);
            }
        }
        total
    }

    /// Sources that were absent, in run order
    #[must_use]
    pub fn missing_sources(&self) -> Vec<PathBuf> {
        self.stages
            .iter()
            .filter_map(|stage| match &stage.result {
                StageResult::Files(result) => result.missing_source.clone(),
                StageResult::Progress { update, .. } => update.missing_source.clone(),
                StageResult::Failed(_) => None,
            })
            .collect()
    }

    /// Whether every stage completed without failures
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.stages.iter().all(|stage| match &stage.result {
            StageResult::Files(result) => result.is_success(),
            StageResult::Progress { .. } => true,
            StageResult::Failed(_) => false,
        })
    }
}

/// Runs the stages of a plan in order
pub struct Deployer {
    synchronizer: TreeSynchronizer,
}

impl Deployer {
    /// Create a deployer sharing one exclusion policy across stages
    #[must_use]
    pub const fn new(policy: ExclusionPolicy, dry_run: bool) -> Self {
        Self {
            synchronizer: TreeSynchronizer::new(policy, dry_run),
        }
    }

    /// Verify preconditions without touching anything
    ///
    /// # Errors
    ///
    /// Returns a [`PreconditionError`] if a required source is absent or an
    /// existing progress document is malformed.
    pub fn check(plan: &DeployPlan) -> Result<()> {
        for stage in plan.stages() {
            let present = match &stage.kind {
                StageKind::Artifact { source, .. } => source.is_file(),
                StageKind::Progress { data_root, .. } | StageKind::Tree { source: data_root, .. } => {
                    data_root.is_dir()
                }
            };

            if !present && stage.required {
                return Err(PreconditionError::MissingSource {
                    path: stage.source().to_path_buf(),
                }
                .into());
            }

            if let StageKind::Progress {
                data_root, document, ..
            } = &stage.kind
                && present
            {
                ProgressDocument::load(&data_root.join(document))?;
            }
        }

        Ok(())
    }

    /// Run every stage of `plan`
    ///
    /// Preconditions are checked first so a failing check mutates nothing.
    /// After that, a stage's failures are recorded and the next stage runs.
    ///
    /// # Errors
    ///
    /// Returns a [`PreconditionError`] if [`Deployer::check`] fails.
    pub fn run(&self, plan: &DeployPlan) -> Result<DeploySummary> {
        Self::check(plan)?;

        let mut summary = DeploySummary {
            stages: Vec::with_capacity(plan.stages().len()),
            dry_run: self.synchronizer.is_dry_run(),
        };

        for stage in plan.stages() {
            info!("[{}]", stage.name);
            let result = self.run_stage(stage);
            summary.stages.push(StageOutcome {
                name: stage.name.clone(),
                result,
            });
        }

        Ok(summary)
    }

    fn run_stage(&self, stage: &Stage) -> StageResult {
        match &stage.kind {
            StageKind::Progress {
                data_root,
                document,
                mode,
            } => {
                let updater = ProgressUpdater::new(data_root, document)
                    .mode(*mode)
                    .dry_run(self.synchronizer.is_dry_run());

                match updater.run() {
                    Ok(update) => StageResult::Progress {
                        update,
                        mode: *mode,
                    },
                    Err(e) => {
                        warn!("  [FAIL] {}: {e:#}", stage.name);
                        StageResult::Failed(format!("{e:#}"))
                    }
                }
            }
            StageKind::Artifact { source, dest_dir } => {
                StageResult::Files(self.synchronizer.sync_file(source, dest_dir))
            }
            StageKind::Tree { source, dest } => {
                StageResult::Files(self.synchronizer.sync(source, dest))
            }
        }
    }
}
