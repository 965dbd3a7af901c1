//! Common types and utilities for command execution

use std::path::Path;

use scenesync_core::config::{Config, ConfigManager, Settings};

/// Execution options shared by every command
pub struct RunOptions<'a> {
    /// Enable verbose output
    pub verbose: bool,
    /// Preview changes without applying (dry-run)
    pub dry_run: bool,
    /// Path to custom config file
    pub config_path: Option<&'a Path>,
    /// Skip loading all config files
    pub no_config: bool,
}

impl<'a> RunOptions<'a> {
    /// Create new run options
    #[must_use]
    pub const fn new(
        verbose: bool,
        dry_run: bool,
        config_path: Option<&'a Path>,
        no_config: bool,
    ) -> Self {
        Self {
            verbose,
            dry_run,
            config_path,
            no_config,
        }
    }

    /// Merged configuration, or the defaults with `--no-config`
    pub fn load_config(&self) -> anyhow::Result<Config> {
        if self.no_config {
            Ok(Config::default())
        } else {
            ConfigManager::load(self.config_path)
        }
    }

    /// Configuration with every default applied
    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        Ok(self.load_config()?.settings())
    }

    /// Closing hint after a dry run
    pub fn print_dry_run_hint(&self) {
        if self.dry_run {
            println!("\nRun without --dry-run to actually copy files.");
        }
    }
}
