//! Configuration types and structures

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Desktop install target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct DesktopConfig {
    /// Self-contained install folder (no default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<PathBuf>,

    /// Build artifact copied into the install folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,

    /// Name of the data folder inside the install folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir_name: Option<String>,
}

/// Removable volume target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct VolumeConfig {
    /// Volume label to look for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Source tree mirrored onto the volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Folder on the volume that receives the source tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdir: Option<String>,

    /// Directories whose children are candidate mount points
    pub search_roots: Vec<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Canonical data tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_root: Option<PathBuf>,

    /// Progress document, relative to the data root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_document: Option<PathBuf>,

    /// Extra file extensions that never deploy
    pub exclude_extensions: Vec<String>,

    /// Extra file or directory names that never deploy
    pub exclude_names: Vec<String>,

    /// Gitignore-style patterns that never deploy
    pub ignore: Vec<String>,

    /// Desktop install settings
    pub desktop: DesktopConfig,

    /// Removable volume settings
    pub volume: VolumeConfig,
}

impl Config {
    /// Resolve every relative path against `base`
    ///
    /// `progress_document` stays relative; it is anchored at the data root.
    #[must_use]
    pub fn anchored_at(mut self, base: &Path) -> Self {
        let anchor = |path: &mut Option<PathBuf>| {
            if let Some(p) = path.as_mut()
                && p.is_relative()
            {
                *p = base.join(&*p);
            }
        };

        anchor(&mut self.data_root);
        anchor(&mut self.desktop.install_dir);
        anchor(&mut self.desktop.artifact);
        anchor(&mut self.volume.source);

        for root in &mut self.volume.search_roots {
            if root.is_relative() {
                *root = base.join(&*root);
            }
        }

        self
    }
}
