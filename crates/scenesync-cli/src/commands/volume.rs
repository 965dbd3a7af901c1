use std::path::Path;

use anyhow::Context;
use scenesync_core::deploy::{DeployPlan, DeployReporter, Deployer};
use scenesync_core::error::PreconditionError;
use scenesync_core::volume::{FixedLocator, MountPointLocator, VolumeLocator};

use crate::commands::RunOptions;

pub struct Volume;

impl Volume {
    pub fn execute(
        label: Option<&str>,
        path: Option<&Path>,
        options: &RunOptions,
    ) -> anyhow::Result<()> {
        let settings = options.load_settings()?;
        let label = label.unwrap_or(&settings.volume.label);

        let locator: Box<dyn VolumeLocator> = match path {
            Some(path) => Box::new(FixedLocator::new(path)),
            None if settings.volume.search_roots.is_empty() => {
                Box::new(MountPointLocator::with_default_roots())
            }
            None => Box::new(MountPointLocator::new(settings.volume.search_roots.clone())),
        };

        let volume_root = locator
            .locate(label)
            .ok_or_else(|| PreconditionError::VolumeNotFound {
                label: label.to_string(),
            })?;

        println!("Found volume at: {}", volume_root.display());
        if options.verbose {
            println!("Source: {}", settings.volume.source.display());
            println!(
                "Destination: {}",
                volume_root.join(&settings.volume.subdir).display()
            );
        }

        let plan = DeployPlan::volume(&settings, &volume_root);
        let deployer = Deployer::new(settings.exclusion_policy()?, options.dry_run);

        let summary = deployer.run(&plan).context("Volume sync aborted")?;

        print!("{}", DeployReporter::generate_summary(&summary));
        options.print_dry_run_hint();

        Ok(())
    }
}
