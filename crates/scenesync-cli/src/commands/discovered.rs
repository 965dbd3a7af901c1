use std::io::IsTerminal;

use scenesync_core::progress::{ProgressReporter, ProgressUpdater, ReconcileMode};

use crate::commands::RunOptions;

pub struct Discovered;

impl Discovered {
    pub fn execute(reset: bool, options: &RunOptions) -> anyhow::Result<()> {
        let settings = options.load_settings()?;

        let mode = if reset {
            ReconcileMode::Reset
        } else {
            ReconcileMode::Preserve
        };

        if options.verbose {
            println!("Data root: {}", settings.data_root.display());
            println!("Progress document: {}", settings.progress_path().display());
            println!("Mode: {mode:?}");
        }

        let update = ProgressUpdater::new(&settings.data_root, &settings.progress_document)
            .mode(mode)
            .dry_run(options.dry_run)
            .run()?;

        if options.dry_run && update.changed() {
            print!("{}", update.diff(std::io::stdout().is_terminal()));
        }

        print!("{}", ProgressReporter::generate_summary(&update, mode));

        if options.dry_run && update.changed() {
            println!("\nRun without --dry-run to write the progress document.");
        }

        Ok(())
    }
}
