//! Per-file sync decisions

use std::fmt;
use std::path::Path;

use crate::comparison::{FileRecord, StalenessPolicy};

/// Why a file was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Destination already matches the source
    UpToDate,
    /// Path is not eligible for sync
    Excluded,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpToDate => f.write_str("up-to-date"),
            Self::Excluded => f.write_str("excluded"),
        }
    }
}

/// What to do with one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    /// Destination is absent or stale
    Copy,
    /// Nothing to do
    Skip(SkipReason),
    /// The file could not be evaluated or copied
    Fail(String),
}

/// Resolves a source/destination pair into a decision
pub struct DecisionResolver;

impl DecisionResolver {
    /// Decide what to do with an eligible `source`, mirrored at `dest`
    ///
    /// Exclusion is settled by the tree listing before this is called.
    #[must_use]
    pub fn decide(source: &Path, dest: &Path) -> SyncDecision {
        let source_record = match FileRecord::stat(source) {
            Ok(record) => record,
            Err(e) => return SyncDecision::Fail(format!("{e:#}")),
        };

        let dest_record = match FileRecord::probe(dest) {
            Ok(record) => record,
            Err(e) => return SyncDecision::Fail(format!("{e:#}")),
        };

        if StalenessPolicy::needs_copy(&source_record, dest_record.as_ref()) {
            SyncDecision::Copy
        } else {
            SyncDecision::Skip(SkipReason::UpToDate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_decide_missing_destination() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("a.json");
        fs::write(&source, "{}").unwrap();

        let decision = DecisionResolver::decide(&source, &tmp.path().join("out/a.json"));
        assert_eq!(decision, SyncDecision::Copy);
    }

    #[test]
    fn test_decide_up_to_date_after_copy() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("a.json");
        let dest = tmp.path().join("out/a.json");
        fs::write(&source, "{}").unwrap();
        fs::create_dir_all(dest.parent().unwrap()).unwrap();
        fs::copy(&source, &dest).unwrap();
        let modified = fs::metadata(&source).unwrap().modified().unwrap();
        fs::File::options()
            .write(true)
            .open(&dest)
            .unwrap()
            .set_modified(modified)
            .unwrap();

        assert_eq!(
            DecisionResolver::decide(&source, &dest),
            SyncDecision::Skip(SkipReason::UpToDate)
        );
    }

    #[test]
    fn test_decide_unreadable_source_fails() {
        let tmp = TempDir::new().unwrap();

        let decision = DecisionResolver::decide(
            &tmp.path().join("gone.json"),
            &tmp.path().join("out/gone.json"),
        );
        assert!(matches!(decision, SyncDecision::Fail(_)));
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::UpToDate.to_string(), "up-to-date");
        assert_eq!(SkipReason::Excluded.to_string(), "excluded");
    }
}
