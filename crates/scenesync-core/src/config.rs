//! Configuration file parsing, merging, and pattern matching
//!
//! This module handles:
//! - Config file discovery from multiple locations
//! - TOML parsing with serde
//! - Config merging with precedence rules
//! - Gitignore-style pattern matching
//! - Validation and error reporting
//! - Resolution of the merged config into concrete settings with defaults

mod discovery;
mod merge;
mod patterns;
mod types;
mod validation;


use std::path::{Path, PathBuf};

use anyhow::Context;

pub use discovery::{ConfigDiscovery, ConfigFiles, LOCAL_CONFIG, PROJECT_CONFIG};
pub use merge::ConfigMerger;
pub use patterns::PatternMatcher;
pub use types::{Config, DesktopConfig, VolumeConfig};
pub use validation::ConfigValidator;

use crate::error::Result;
use crate::scanner::{ExclusionPolicy, Pattern};

/// Default canonical data tree
pub const DEFAULT_DATA_ROOT: &str = "KSC_DATA";
/// Default progress document location inside the data root
pub const DEFAULT_PROGRESS_DOCUMENT: &str = "GAME_STATE/Game_State.json";
/// Default build artifact deployed to the desktop
pub const DEFAULT_ARTIFACT: &str = "BUILD/Debug/KSC_Raylib.exe";
/// Default label of the removable volume
pub const DEFAULT_VOLUME_LABEL: &str = "KSC_SD";
/// Default tree mirrored onto the removable volume
pub const DEFAULT_VOLUME_SOURCE: &str = "KSC/SD";
/// Default folder on the removable volume
pub const DEFAULT_VOLUME_SUBDIR: &str = "SD";

/// Configuration manager that coordinates discovery, parsing, merging, and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load and merge configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly requested config file is missing,
    /// or if any config file is invalid or cannot be read.
    pub fn load(cli_config_path: Option<&Path>) -> Result<Config> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let files = ConfigDiscovery::discover(cli_config_path, &cwd);
        Self::load_files(&files)
    }

    /// Merge and validate an already discovered set of files
    ///
    /// # Errors
    ///
    /// Returns an error if any listed file is missing or invalid.
    pub fn load_files(files: &ConfigFiles) -> Result<Config> {
        if let Some(cli) = &files.cli
            && !cli.is_file()
        {
            anyhow::bail!("Config file not found: {}", cli.display());
        }

        let merged = ConfigMerger::merge(files)?;
        ConfigValidator::validate(&merged)?;

        Ok(merged)
    }
}

/// Desktop install settings with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopSettings {
    /// Install folder, if configured
    pub install_dir: Option<PathBuf>,
    /// Build artifact to deploy
    pub artifact: PathBuf,
    /// Data folder name inside the install folder
    pub data_dir_name: String,
}

/// Removable volume settings with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSettings {
    /// Label to search for
    pub label: String,
    /// Tree mirrored onto the volume
    pub source: PathBuf,
    /// Folder on the volume receiving the tree
    pub subdir: String,
    /// Extra directories whose children are candidate mount points
    pub search_roots: Vec<PathBuf>,
}

/// Concrete settings for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Canonical data tree
    pub data_root: PathBuf,
    /// Progress document, relative to the data root
    pub progress_document: PathBuf,
    /// Extra excluded extensions
    pub exclude_extensions: Vec<String>,
    /// Extra excluded names
    pub exclude_names: Vec<String>,
    /// Gitignore-style exclusions
    pub ignore: Vec<String>,
    /// Desktop target
    pub desktop: DesktopSettings,
    /// Removable volume target
    pub volume: VolumeSettings,
}

impl Settings {
    /// Absolute location of the progress document
    #[must_use]
    pub fn progress_path(&self) -> PathBuf {
        self.data_root.join(&self.progress_document)
    }

    /// Build the exclusion policy: built-in denylists plus configured extras
    ///
    /// # Errors
    ///
    /// Returns an error if an ignore pattern is invalid.
    pub fn exclusion_policy(&self) -> Result<ExclusionPolicy> {
        let extras = self
            .exclude_extensions
            .iter()
            .map(|ext| Pattern::extension(ext))
            .chain(self.exclude_names.iter().map(|name| Pattern::name(name)));

        let policy = ExclusionPolicy::new().with_patterns(extras);

        if self.ignore.is_empty() {
            Ok(policy)
        } else {
            Ok(policy.with_matcher(PatternMatcher::with_patterns(&self.ignore)?))
        }
    }
}

impl Config {
    /// Apply defaults to every unset value
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            data_root: self
                .data_root
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_ROOT)),
            progress_document: self
                .progress_document
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRESS_DOCUMENT)),
            exclude_extensions: self.exclude_extensions.clone(),
            exclude_names: self.exclude_names.clone(),
            ignore: self.ignore.clone(),
            desktop: DesktopSettings {
                install_dir: self.desktop.install_dir.clone(),
                artifact: self
                    .desktop
                    .artifact
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT)),
                data_dir_name: self
                    .desktop
                    .data_dir_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DATA_ROOT.to_string()),
            },
            volume: VolumeSettings {
                label: self
                    .volume
                    .label
                    .clone()
                    .unwrap_or_else(|| DEFAULT_VOLUME_LABEL.to_string()),
                source: self
                    .volume
                    .source
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_VOLUME_SOURCE)),
                subdir: self
                    .volume
                    .subdir
                    .clone()
                    .unwrap_or_else(|| DEFAULT_VOLUME_SUBDIR.to_string()),
                search_roots: self.volume.search_roots.clone(),
            },
        }
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration")
    }
}
