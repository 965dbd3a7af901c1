//! End-of-run summary for deployments

use std::fmt::Write;

use super::runner::{DeploySummary, StageResult};
use crate::progress::ProgressReporter;
use crate::sync::SyncReporter;

const RULE: &str = "==================================================";

/// Deployment summary reporter
pub struct DeployReporter;

impl DeployReporter {
    /// Per-stage details followed by totals and an overall status
    #[must_use]
    pub fn generate_summary(summary: &DeploySummary) -> String {
        let mut output = String::new();

        let title = if summary.dry_run {
            "Sync Summary (DRY RUN)"
        } else {
            "Sync Summary"
        };
        let _ = write!(output, "\n{RULE}\n{title}\n{RULE}\n");

        for stage in &summary.stages {
            let _ = writeln!(output, "[{}]", stage.name);
            match &stage.result {
                StageResult::Progress { update, mode } => {
                    ProgressReporter::write_details(&mut output, update, *mode, "  ");
                }
                StageResult::Files(result) => {
                    if let Some(missing) = &result.missing_source {
                        let _ = writeln!(output, "  Skipped: {} not found", missing.display());
                    } else {
                        SyncReporter::write_counts(&mut output, result, "  ");
                    }
                }
                StageResult::Failed(reason) => {
                    let _ = writeln!(output, "  Failed: {reason}");
                }
            }
        }

        let totals = summary.totals();
        let _ = writeln!(output, "{RULE}");
        let _ = writeln!(
            output,
            "Total: {} copied, {} skipped, {} failed",
            totals.copied, totals.skipped, totals.failed
        );

        if summary.is_success() {
            output.push_str("Status: ✓ Success\n");
        } else {
            output.push_str("Status: ✗ Completed with errors\n");
        }

        output
    }
}
