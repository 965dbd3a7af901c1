//! Exclusion of source-only and tooling files from sync

use std::ffi::OsStr;
use std::path::{Component, Path};

use crate::config::PatternMatcher;

/// Built-in extensions that never deploy (firmware and native sources)
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &["ino", "cpp", "h"];

/// Built-in file and directory names that never deploy
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &[".git", ".gitignore", "__pycache__"];

/// Pattern for matching file paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Match files with a specific extension (e.g., "cpp"), without the dot
    Extension(String),
    /// Match any path component with a specific name (e.g., ".git")
    Name(String),
}

impl Pattern {
    /// Build an extension pattern, accepting `".cpp"` and `"cpp"` alike
    #[must_use]
    pub fn extension(ext: &str) -> Self {
        Self::Extension(ext.trim_start_matches('.').to_string())
    }

    /// Build a component-name pattern
    #[must_use]
    pub fn name(name: &str) -> Self {
        Self::Name(name.to_string())
    }

    /// Check if this pattern matches the given path
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Self::Extension(ext) => path.extension().is_some_and(|e| e == ext.as_str()),
            Self::Name(name) => components(path).any(|c| c == name.as_str()),
        }
    }
}

fn components(path: &Path) -> impl Iterator<Item = &OsStr> {
    path.components().filter_map(|c| match c {
        Component::Normal(name) => Some(name),
        _ => None,
    })
}

/// Decides whether a path is eligible for sync
///
/// Paths are evaluated relative to the sync root. An excluded path is never
/// copied regardless of staleness.
#[derive(Default)]
pub struct ExclusionPolicy {
    patterns: Vec<Pattern>,
    matcher: Option<PatternMatcher>,
}

impl ExclusionPolicy {
    /// Policy with the built-in denylists
    #[must_use]
    pub fn new() -> Self {
        let patterns = DEFAULT_EXCLUDED_EXTENSIONS
            .iter()
            .map(|ext| Pattern::extension(ext))
            .chain(DEFAULT_EXCLUDED_NAMES.iter().map(|name| Pattern::name(name)))
            .collect();

        Self {
            patterns,
            matcher: None,
        }
    }

    /// Policy that excludes nothing
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add extra patterns on top of the current ones
    #[must_use]
    pub fn with_patterns(mut self, patterns: impl IntoIterator<Item = Pattern>) -> Self {
        self.patterns.extend(patterns);
        self
    }

    /// Add gitignore-style patterns
    #[must_use]
    pub fn with_matcher(mut self, matcher: PatternMatcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Check whether a file path (relative to the sync root) is excluded
    #[must_use]
    pub fn is_excluded(&self, rel_path: &Path) -> bool {
        if self.patterns.iter().any(|p| p.matches(rel_path)) {
            return true;
        }

        self.matcher
            .as_ref()
            .is_some_and(|m| !m.should_include_path(rel_path, false))
    }

    /// Check whether a whole directory can be skipped during traversal
    ///
    /// Only name and gitignore rules apply to directories; extension rules
    /// are reserved for files.
    #[must_use]
    pub fn prunes_dir(&self, rel_dir: &Path) -> bool {
        let named = self
            .patterns
            .iter()
            .any(|p| matches!(p, Pattern::Name(_)) && p.matches(rel_dir));

        named
            || self
                .matcher
                .as_ref()
                .is_some_and(|m| !m.should_include_path(rel_dir, true))
    }
}
