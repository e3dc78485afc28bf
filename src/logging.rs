//! Diagnostic output for the command-line binary.

use crate::config::Config;
use crate::error::{RegistryError, Result};
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| RegistryError::InvalidConfig(format!("Failed to initialise logging: {}", e)))
}
