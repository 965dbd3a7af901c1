use anyhow::Context;
use scenesync_core::config::{ConfigDiscovery, ConfigFiles, ConfigManager};

use crate::commands::RunOptions;

pub struct Config;

impl Config {
    pub fn execute(options: &RunOptions) -> anyhow::Result<()> {
        let files = if options.no_config {
            ConfigFiles::default()
        } else {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            ConfigDiscovery::discover(options.config_path, &cwd)
        };

        println!("Config files (lowest to highest precedence):");
        let mut any = false;
        for path in files.in_merge_order() {
            println!("  {}", path.display());
            any = true;
        }
        if !any {
            println!("  (none, using defaults)");
        }

        let config = ConfigManager::load_files(&files)?;
        let settings = config.settings();

        println!("\nActive configuration:");
        let rendered = config.to_toml_string()?;
        if rendered.trim().is_empty() {
            println!("  (defaults)");
        } else {
            print!("{rendered}");
        }

        println!("\nResolved settings:");
        println!("  data_root: {}", settings.data_root.display());
        println!("  progress_document: {}", settings.progress_path().display());
        println!(
            "  desktop.install_dir: {}",
            settings
                .desktop
                .install_dir
                .as_ref()
                .map_or_else(|| "(not set)".to_string(), |p| p.display().to_string())
        );
        println!("  desktop.artifact: {}", settings.desktop.artifact.display());
        println!("  desktop.data_dir_name: {}", settings.desktop.data_dir_name);
        println!("  volume.label: {}", settings.volume.label);
        println!("  volume.source: {}", settings.volume.source.display());
        println!("  volume.subdir: {}", settings.volume.subdir);

        if options.verbose {
            println!("  exclude_extensions: {:?}", settings.exclude_extensions);
            println!("  exclude_names: {:?}", settings.exclude_names);
            println!("  ignore: {:?}", settings.ignore);
        }

        Ok(())
    }
}
