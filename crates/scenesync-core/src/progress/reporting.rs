//! Progress update reporting

use std::fmt::Write;

use super::reconciler::ReconcileMode;
use super::updater::ProgressUpdate;

/// Progress update reporter
pub struct ProgressReporter;

impl ProgressReporter {
    /// Describe added and removed scenes and the document outcome
    #[must_use]
    pub fn generate_summary(update: &ProgressUpdate, mode: ReconcileMode) -> String {
        let mut output = String::new();
        Self::write_details(&mut output, update, mode, "");
        output
    }

    /// Write the report, each line prefixed by `indent`
    pub fn write_details(
        output: &mut String,
        update: &ProgressUpdate,
        mode: ReconcileMode,
        indent: &str,
    ) {
        if let Some(missing) = &update.missing_source {
            let _ = writeln!(output, "{indent}Data root not found: {}", missing.display());
            return;
        }

        let rec = &update.reconciliation;

        if mode == ReconcileMode::Reset {
            let _ = writeln!(
                output,
                "{indent}Reset: {} entries restored to defaults.",
                rec.total_entities()
            );
        }

        if !rec.added.is_empty() {
            let _ = writeln!(output, "{indent}Added   ({}):", rec.added.len());
            for added in &rec.added {
                let _ = writeln!(
                    output,
                    "{indent}  {}  [{}, default={}]",
                    added.key, added.group, added.default_value
                );
            }
        }

        if !rec.removed.is_empty() {
            let _ = writeln!(output, "{indent}Removed ({}):", rec.removed.len());
            for key in &rec.removed {
                let _ = writeln!(output, "{indent}  {key}");
            }
        }

        if mode == ReconcileMode::Preserve && rec.added.is_empty() && rec.removed.is_empty() {
            let _ = writeln!(
                output,
                "{indent}Up to date: {} discoverable scenes tracked in {} groups.",
                rec.total_entities(),
                rec.groups.len()
            );
        }

        let status = if update.written {
            "written"
        } else if update.changed() {
            "would be written"
        } else {
            "unchanged"
        };
        let _ = writeln!(
            output,
            "{indent}Progress document {status}: {}",
            update.document_path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::AddedKey;
    use std::path::PathBuf;

    fn update() -> ProgressUpdate {
        ProgressUpdate {
            document_path: PathBuf::from("KSC_DATA/GAME_STATE/Game_State.json"),
            ..ProgressUpdate::default()
        }
    }

    #[test]
    fn test_summary_lists_added_and_removed() {
        let mut update = update();
        update.reconciliation.added.push(AddedKey {
            key: "/NOTES/AVERY/N1.json".to_string(),
            group: "avery_notes".to_string(),
            default_value: false,
        });
        update.reconciliation.removed.push("/Old.json".to_string());
        update.after = "{}\n".to_string();
        update.written = true;

        let summary = ProgressReporter::generate_summary(&update, ReconcileMode::Preserve);

        assert!(summary.contains("Added   (1):"));
        assert!(summary.contains("/NOTES/AVERY/N1.json  [avery_notes, default=false]"));
        assert!(summary.contains("Removed (1):"));
        assert!(summary.contains("  /Old.json"));
        assert!(summary.contains("Progress document written"));
        assert!(!summary.contains("Up to date"));
    }

    #[test]
    fn test_summary_up_to_date() {
        let summary = ProgressReporter::generate_summary(&update(), ReconcileMode::Preserve);

        assert!(summary.contains("Up to date: 0 discoverable scenes tracked in 0 groups."));
        assert!(summary.contains("Progress document unchanged"));
    }

    #[test]
    fn test_summary_reset_and_dry_run() {
        let mut update = update();
        update.after = "{}\n".to_string();

        let summary = ProgressReporter::generate_summary(&update, ReconcileMode::Reset);

        assert!(summary.contains("Reset: 0 entries restored to defaults."));
        assert!(summary.contains("Progress document would be written"));
    }

    #[test]
    fn test_summary_missing_data_root() {
        let mut update = update();
        update.missing_source = Some(PathBuf::from("KSC_DATA"));

        let summary = ProgressReporter::generate_summary(&update, ReconcileMode::Preserve);

        assert_eq!(summary, "Data root not found: KSC_DATA\n");
    }
}
