//! Diff generation for previewing document rewrites

use std::fmt::Write;

use similar::{ChangeTag, TextDiff};

/// Diff generator for in-memory text
pub struct DiffGenerator;

impl DiffGenerator {
    const CONTEXT_LINES: usize = 3;

    /// Generate a unified-style diff from `before` to `after`
    ///
    /// Only changed hunks are emitted, with a few lines of context. When
    /// `color` is set, insertions and deletions are wrapped in ANSI codes.
    #[must_use]
    pub fn generate(before: &str, after: &str, label: &str, color: bool) -> String {
        let mut output = String::new();
        if before == after {
            return output;
        }

        let diff = TextDiff::from_lines(before, after);

        let (bold, reset) = if color { ("\x1b[1m", "\x1b[0m") } else { ("", "") };
        let _ = writeln!(output, "{bold}--- {label} (current){reset}");
        let _ = writeln!(output, "{bold}+++ {label} (updated){reset}");

        for (idx, group) in diff.grouped_ops(Self::CONTEXT_LINES).iter().enumerate() {
            if idx > 0 {
                output.push_str("...\n");
            }

            for op in group {
                for change in diff.iter_changes(op) {
                    let (sign, tint) = match change.tag() {
                        ChangeTag::Delete => ("-", "\x1b[31m"),
                        ChangeTag::Insert => ("+", "\x1b[32m"),
                        ChangeTag::Equal => (" ", ""),
                    };
                    let tint = if color { tint } else { "" };
                    let newline = if change.value().ends_with('\n') { "" } else { "\n" };

                    let _ = write!(output, "{tint}{sign}{}{newline}{reset}", change.value());
                }
            }
        }

        output
    }
}
