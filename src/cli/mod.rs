use crate::version::{PKG_NAME, VERSION};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate configuration files
    Validate {
        /// Optional path to a specific config file to validate
        file: Option<PathBuf>,
    },

    /// Show effective configuration after merging all sources
    Show,
}

#[derive(Parser, Debug)]
#[command(name = PKG_NAME)]
#[command(about = "Generate and maintain editor agent records from a central index", long_about = None)]
#[command(version = VERSION)]
#[command(after_help = "\
PIPELINE:
  generate   index -> one record file per agent (+ copy of the index)
  improve    add new agents to the index and stage a patch
  apply      merge the staged patch into existing records

Only one command may run against a registry directory at a time.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate agent record files from an index
    Generate {
        /// Index to read (default: paths.index from config)
        #[arg(long)]
        index: Option<PathBuf>,

        /// Output directory (prompts when omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Add new agents to the registry and stage improvements for existing ones
    Improve {
        /// Registry directory (default: paths.registry_dir from config)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Apply staged improvements and remove the patch document
    Apply {
        /// Registry directory (default: paths.registry_dir from config)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Run generate, improve and apply in sequence
    Sync {
        /// Index to read (default: paths.index from config)
        #[arg(long)]
        index: Option<PathBuf>,

        /// Registry directory (default: paths.registry_dir from config)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Show pipeline state and check index/record consistency
    Status {
        /// Registry directory (default: paths.registry_dir from config)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}
