mod cli;
mod commands;
mod logging;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use commands::RunOptions;

fn main() -> anyhow::Result<()> {
    // Set up Ctrl+C handler for graceful interruption
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130); // Standard exit code for SIGINT
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    logging::init(cli.verbose).context("Failed to initialize logging")?;

    let options = RunOptions::new(
        cli.verbose,
        cli.dry_run,
        cli.config.as_deref(),
        cli.no_config,
    );

    match &cli.command {
        Commands::Discovered { reset } => {
            commands::Discovered::execute(*reset, &options)
                .context("Failed to execute discovered command")?;
        }
        Commands::Desktop { install_dir } => {
            commands::Desktop::execute(install_dir.as_deref(), &options)
                .context("Failed to execute desktop command")?;
        }
        Commands::Volume { label, path } => {
            commands::Volume::execute(label.as_deref(), path.as_deref(), &options)
                .context("Failed to execute volume command")?;
        }
        Commands::Config => {
            commands::Config::execute(&options).context("Failed to execute config command")?;
        }
    }

    Ok(())
}
