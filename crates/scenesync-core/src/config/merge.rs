//! Configuration merging with precedence rules
//!
//! # Merging Semantics
//!
//! - **Lists** (exclusions, ignore patterns, search roots): additive, all
//!   values from all configs are combined
//! - **Scalars** (paths, labels): the highest-precedence file that sets a
//!   value wins
//!
//! Relative paths are anchored at the directory of the file that set them.

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::discovery::ConfigFiles;
use super::types::Config;
use crate::error::Result;

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple config files with precedence rules
    ///
    /// Precedence order (highest to lowest):
    /// 1. CLI config
    /// 2. .scenesync.local
    /// 3. .scenesync
    /// 4. Global config
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn merge(files: &ConfigFiles) -> Result<Config> {
        let mut merged = Config::default();

        for path in files.in_merge_order() {
            Self::merge_into(&mut merged, path)?;
        }

        Ok(merged)
    }

    /// Load and merge a single config file into the existing config
    fn merge_into(base: &mut Config, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        let config = match path.parent() {
            Some(dir) => config.anchored_at(dir),
            None => config,
        };

        Self::overlay(base, config);
        Ok(())
    }

    /// Apply `top` over `base`
    pub fn overlay(base: &mut Config, top: Config) {
        base.exclude_extensions.extend(top.exclude_extensions);
        base.exclude_names.extend(top.exclude_names);
        base.ignore.extend(top.ignore);
        base.volume.search_roots.extend(top.volume.search_roots);

        base.data_root = top.data_root.or(base.data_root.take());
        base.progress_document = top.progress_document.or(base.progress_document.take());

        base.desktop.install_dir = top.desktop.install_dir.or(base.desktop.install_dir.take());
        base.desktop.artifact = top.desktop.artifact.or(base.desktop.artifact.take());
        base.desktop.data_dir_name = top
            .desktop
            .data_dir_name
            .or(base.desktop.data_dir_name.take());

        base.volume.label = top.volume.label.or(base.volume.label.take());
        base.volume.source = top.volume.source.or(base.volume.source.take());
        base.volume.subdir = top.volume.subdir.or(base.volume.subdir.take());
    }
}
