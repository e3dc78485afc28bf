use crate::cli::ConfigCommands;
use crate::config::{global_config_path, Config, CONFIG_FILE_NAME};
use crate::error::Result;
use std::path::{Path, PathBuf};

pub fn execute(command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Validate { file } => validate(file.as_deref()),
        ConfigCommands::Show => show(),
    }
}

fn validate(file: Option<&Path>) -> Result<()> {
    if let Some(file) = file {
        println!("Validating {}...", file.display());
        return report(Config::from_file(file).and_then(|c| c.validate().map(|_| c)));
    }

    let project_config = current_dir()?.join(CONFIG_FILE_NAME);
    let global_config =
        global_config_path().unwrap_or_else(|| PathBuf::from("~").join(CONFIG_FILE_NAME));

    println!("Validating configuration files...\n");
    for (label, path) in [("Global", &global_config), ("Project", &project_config)] {
        if path.exists() {
            println!("  {} config: {}", label, path.display());
        } else {
            println!("  {} config: {} - not found (optional)", label, path.display());
        }
    }

    println!("\nLoading and validating configuration...");
    report(Config::load(&current_dir()?))
}

fn report(result: Result<Config>) -> Result<()> {
    match result {
        Ok(_) => {
            println!("✓ Configuration is valid!");
            Ok(())
        }
        Err(e) => {
            println!("✗ Configuration is invalid!");
            println!("  Error: {}", e);
            Err(e)
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load(&current_dir()?)?;

    println!("Effective Configuration:");
    println!("(CLI > Environment > Project config > Global config > Defaults)\n");

    println!("Paths:");
    println!("  index: {}", config.paths.index);
    println!("  registry_dir: {}", config.paths.registry_dir);

    println!("\nLogging:");
    println!("  level: {}", config.logging.level);

    Ok(())
}

fn current_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}
