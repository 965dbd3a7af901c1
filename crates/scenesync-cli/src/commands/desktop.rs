use std::path::Path;

use anyhow::Context;
use scenesync_core::deploy::{DeployPlan, DeployReporter, Deployer};
use scenesync_core::error::PreconditionError;

use crate::commands::RunOptions;

pub struct Desktop;

impl Desktop {
    pub fn execute(install_dir: Option<&Path>, options: &RunOptions) -> anyhow::Result<()> {
        let settings = options.load_settings()?;

        let install_dir = install_dir
            .map(Path::to_path_buf)
            .or_else(|| settings.desktop.install_dir.clone())
            .ok_or(PreconditionError::NotConfigured {
                setting: "desktop.install_dir",
            })?;

        if options.verbose {
            println!("Data root: {}", settings.data_root.display());
            println!("Artifact: {}", settings.desktop.artifact.display());
            println!("Install dir: {}", install_dir.display());
        }

        let plan = DeployPlan::desktop(&settings, &install_dir);
        let deployer = Deployer::new(settings.exclusion_policy()?, options.dry_run);

        let summary = deployer.run(&plan).context("Deployment aborted")?;

        print!("{}", DeployReporter::generate_summary(&summary));
        options.print_dry_run_hint();

        Ok(())
    }
}
