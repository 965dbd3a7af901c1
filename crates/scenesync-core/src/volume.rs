//! Removable volume lookup by label
//!
//! Mounted volumes show up as directories named after their label under a
//! handful of well-known mount roots. The locator is a trait so callers and
//! tests can supply their own roots or an explicit path.

use std::path::PathBuf;

use tracing::debug;

/// Finds the mount point of a volume by its label
pub trait VolumeLocator {
    /// Mount point of the volume labelled `label`, if one is mounted
    fn locate(&self, label: &str) -> Option<PathBuf>;
}

/// Looks for `<root>/<label>` under a list of mount roots
#[derive(Debug, Clone, Default)]
pub struct MountPointLocator {
    search_roots: Vec<PathBuf>,
}

impl MountPointLocator {
    /// Search exactly the given roots, in order
    #[must_use]
    pub const fn new(search_roots: Vec<PathBuf>) -> Self {
        Self { search_roots }
    }

    /// Search the platform's usual mount roots
    #[must_use]
    pub fn with_default_roots() -> Self {
        Self::new(default_search_roots())
    }
}

impl VolumeLocator for MountPointLocator {
    fn locate(&self, label: &str) -> Option<PathBuf> {
        if label.is_empty() {
            return None;
        }

        self.search_roots.iter().find_map(|root| {
            let candidate = root.join(label);
            debug!("Checking {}", candidate.display());
            candidate
                .is_dir()
                .then(|| dunce::canonicalize(&candidate).unwrap_or(candidate))
        })
    }
}

/// A locator that always answers with one path, e.g. from `--path`
#[derive(Debug, Clone)]
pub struct FixedLocator {
    path: PathBuf,
}

impl FixedLocator {
    /// Answer every lookup with `path`, if it is a directory
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl VolumeLocator for FixedLocator {
    fn locate(&self, _label: &str) -> Option<PathBuf> {
        self.path.is_dir().then(|| self.path.clone())
    }
}

#[cfg(unix)]
fn default_search_roots() -> Vec<PathBuf> {
    use std::path::Path;

    let mut roots = Vec::new();

    if let Ok(user) = std::env::var("USER") {
        roots.push(Path::new("/media").join(&user));
        roots.push(Path::new("/run/media").join(&user));
    }

    roots.extend(["/Volumes", "/mnt", "/media"].map(PathBuf::from));
    roots
}

// Drive letters are not directories under a common root; configure
// `volume.search_roots` or pass `--path` instead.
#[cfg(not(unix))]
const fn default_search_roots() -> Vec<PathBuf> {
    Vec::new()
}
