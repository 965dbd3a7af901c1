use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scene Content Deployment Tool
///
/// Mirror the canonical scene data onto the desktop install and the SD card,
/// and keep the discovered-scene progress document in step with the data
#[derive(Parser, Debug)]
#[command(name = "scenesync")]
#[command(about, long_about = None, version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Preview changes without executing (dry-run)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Use specific config file
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile the progress document with the discoverable scenes
    Discovered {
        /// Restore every scene to its authoring default (new game)
        #[arg(long)]
        reset: bool,
    },

    /// Deploy the build and the data tree to the desktop install
    Desktop {
        /// Install folder (overrides desktop.install_dir)
        #[arg(long, value_name = "PATH")]
        install_dir: Option<PathBuf>,
    },

    /// Mirror the SD tree onto the removable volume
    Volume {
        /// Volume label to look for (overrides volume.label)
        #[arg(long, value_name = "LABEL", conflicts_with = "path")]
        label: Option<String>,

        /// Use this mount point instead of searching by label
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Show active configuration and debug settings
    Config,
}
