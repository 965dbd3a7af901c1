//! Sync operation reporting and statistics

use std::fmt::Write;

use super::SyncResult;

/// Sync operation reporter
pub struct SyncReporter;

impl SyncReporter {
    /// Write the count lines and error list, each line prefixed by `indent`
    pub fn write_counts(output: &mut String, result: &SyncResult, indent: &str) {
        let _ = writeln!(output, "{indent}Copied:  {}", result.copied);
        let _ = writeln!(output, "{indent}Skipped: {} (up-to-date)", result.skipped);
        let _ = writeln!(output, "{indent}Failed:  {}", result.failed);

        if !result.errors.is_empty() {
            let _ = writeln!(output, "{indent}Errors ({}):", result.errors.len());
            for error in &result.errors {
                let _ = writeln!(output, "{indent}  - {error}");
            }
        }
    }
}
