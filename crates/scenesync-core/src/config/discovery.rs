//! Configuration file discovery from multiple locations

use std::path::{Path, PathBuf};

/// Project config file name
pub const PROJECT_CONFIG: &str = ".scenesync";

/// Machine-local project config file name (not meant to be committed)
pub const LOCAL_CONFIG: &str = ".scenesync.local";

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFiles {
    /// Config from CLI flag (highest precedence)
    pub cli: Option<PathBuf>,
    /// Project-local config (.scenesync.local)
    pub local: Option<PathBuf>,
    /// Project config (.scenesync)
    pub project: Option<PathBuf>,
    /// Global XDG config
    pub global: Option<PathBuf>,
}

impl ConfigFiles {
    /// Discovered files from lowest to highest precedence
    pub fn in_merge_order(&self) -> impl Iterator<Item = &Path> {
        [&self.global, &self.project, &self.local, &self.cli]
            .into_iter()
            .filter_map(|p| p.as_deref())
    }
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover all available configuration files
    ///
    /// Project files are searched from `start` upwards.
    #[must_use]
    pub fn discover(cli_path: Option<&Path>, start: &Path) -> ConfigFiles {
        ConfigFiles {
            cli: cli_path.map(Path::to_path_buf),
            local: Self::find_file(start, LOCAL_CONFIG),
            project: Self::find_file(start, PROJECT_CONFIG),
            global: Self::find_global_config(),
        }
    }

    /// Find a config file in `start` or any of its parent directories
    fn find_file(start: &Path, name: &str) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Find global config in XDG config directory
    fn find_global_config() -> Option<PathBuf> {
        let global_config = dirs::config_dir()?.join("scenesync").join("config.toml");

        global_config.is_file().then_some(global_config)
    }
}
