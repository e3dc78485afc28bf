#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use agent_registry::cli::{Cli, Commands};
use agent_registry::config::Config;
use agent_registry::{commands, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands report their own load errors
    if let Commands::Config { command } = &cli.command {
        commands::config::execute(command)?;
        return Ok(());
    }

    let config = Config::load(&std::env::current_dir()?)?.with_verbose(cli.verbose);
    logging::init(&config)?;

    match &cli.command {
        Commands::Generate { index, output } => {
            commands::generate::execute(&config, index.as_deref(), output.as_deref())?;
        }
        Commands::Improve { dir } => {
            commands::improve::execute(&config, dir.as_deref())?;
        }
        Commands::Apply { dir } => {
            commands::apply::execute(&config, dir.as_deref())?;
        }
        Commands::Sync { index, dir } => {
            commands::sync::execute(&config, index.as_deref(), dir.as_deref())?;
        }
        Commands::Status { dir } => {
            commands::status::execute(&config, dir.as_deref())?;
        }
        Commands::Config { .. } => unreachable!("handled above"),
    }

    Ok(())
}
