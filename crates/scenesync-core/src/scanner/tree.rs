//! Recursive enumeration of the files in a content tree

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::exclusion::ExclusionPolicy;

/// Files found under a root, relative to it, in a stable order
#[derive(Debug, Clone, Default)]
pub struct TreeListing {
    /// Eligible regular files, relative to the root
    pub files: Vec<PathBuf>,
    /// Files left out by the exclusion policy
    pub excluded: Vec<PathBuf>,
    /// Entries that could not be read during traversal
    pub warnings: Vec<String>,
}

/// Walks a source tree applying an exclusion policy
pub struct ContentTree<'a> {
    root: &'a Path,
    policy: &'a ExclusionPolicy,
}

impl<'a> ContentTree<'a> {
    /// Create a walker for `root`
    #[must_use]
    pub const fn new(root: &'a Path, policy: &'a ExclusionPolicy) -> Self {
        Self { root, policy }
    }

    /// List every regular file under the root
    ///
    /// Directories are not sync units and never appear in the listing.
    /// Excluded directories are pruned without descending into them.
    /// Unreadable entries are reported as warnings and traversal continues.
    #[must_use]
    pub fn list(&self) -> TreeListing {
        let mut listing = TreeListing::default();

        let walker = WalkDir::new(self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                entry
                    .path()
                    .strip_prefix(self.root)
                    .map_or(true, |rel| !self.policy.prunes_dir(rel))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    listing.warnings.push(format!("Failed to read entry: {e}"));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(rel_path) = entry.path().strip_prefix(self.root) else {
                continue;
            };

            if self.policy.is_excluded(rel_path) {
                listing.excluded.push(rel_path.to_path_buf());
            } else {
                listing.files.push(rel_path.to_path_buf());
            }
        }

        listing
    }
}
