//! Gitignore-style pattern matching using the ignore crate

use std::path::Path;

use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::Result;

/// Gitignore-style exclusion matcher
///
/// A `!pattern` line re-includes what an earlier line ignored.
pub struct PatternMatcher {
    gitignore: Gitignore,
}

impl PatternMatcher {
    /// Build a matcher from gitignore-style lines, in order
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is invalid.
    pub fn with_patterns(patterns: &[String]) -> Result<Self> {
        let mut builder = GitignoreBuilder::new("");

        for pattern in patterns {
            builder
                .add_line(None, pattern)
                .with_context(|| format!("Invalid ignore pattern: '{pattern}'"))?;
        }

        let gitignore = builder.build().context("Failed to build ignore patterns")?;

        Ok(Self { gitignore })
    }

    /// Check a relative path, including every directory above it
    ///
    /// A file under an ignored directory is ignored even though the file
    /// name itself matches nothing.
    #[must_use]
    pub fn should_include_path(&self, rel_path: &Path, is_dir: bool) -> bool {
        !self
            .gitignore
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }
}
