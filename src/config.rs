use crate::error::{RegistryError, Result};
use crate::utils::path::resolve_user_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the global (`~/`) and project (current directory) config files.
pub const CONFIG_FILE_NAME: &str = ".agent-registry.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Verbose mode from the command line (not stored in config file)
    #[serde(skip)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Source index read by `generate`
    #[serde(default = "default_index")]
    pub index: String,

    /// Directory holding records, the index copy and the pending patch
    #[serde(default = "default_registry_dir")]
    pub registry_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            index: default_index(),
            registry_dir: default_registry_dir(),
        }
    }
}

fn default_index() -> String {
    crate::registry::INDEX_FILE_NAME.to_string()
}

fn default_registry_dir() -> String {
    "agents".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration with precedence:
    /// 1. CLI flags (applied later via with_cli_overrides)
    /// 2. Environment variables
    /// 3. Project config (.agent-registry.toml in the working directory)
    /// 4. Global config (~/.agent-registry.toml)
    /// 5. Built-in defaults
    pub fn load(project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_config) = global_config_path() {
            if global_config.exists() {
                config = config.merge(Self::from_file(&global_config)?);
            }
        }

        let project_config = project_root.join(CONFIG_FILE_NAME);
        if project_config.exists() {
            config = config.merge(Self::from_file(&project_config)?);
        }

        config = config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Load a single TOML file without merging.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(mut self, other: Self) -> Self {
        if other.paths.index != default_index() {
            self.paths.index = other.paths.index;
        }
        if other.paths.registry_dir != default_registry_dir() {
            self.paths.registry_dir = other.paths.registry_dir;
        }
        if other.logging.level != default_log_level() {
            self.logging.level = other.logging.level;
        }
        self
    }

    fn merge_env(mut self) -> Self {
        if let Ok(index) = std::env::var("AGENT_REGISTRY_INDEX") {
            if !index.is_empty() {
                self.paths.index = index;
            }
        }
        if let Ok(dir) = std::env::var("AGENT_REGISTRY_DIR") {
            if !dir.is_empty() {
                self.paths.registry_dir = dir;
            }
        }
        if let Ok(level) = std::env::var("AGENT_REGISTRY_LOG") {
            if !level.is_empty() {
                self.logging.level = level.to_lowercase();
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.paths.index.trim().is_empty() {
            return Err(RegistryError::InvalidConfig(
                "paths.index cannot be empty".to_string(),
            ));
        }
        if self.paths.registry_dir.trim().is_empty() {
            return Err(RegistryError::InvalidConfig(
                "paths.registry_dir cannot be empty".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(RegistryError::InvalidConfig(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }
        Ok(())
    }

    /// Apply CLI overrides (highest precedence)
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn index_path(&self) -> PathBuf {
        resolve_user_path(&self.paths.index)
    }

    pub fn registry_dir(&self) -> PathBuf {
        resolve_user_path(&self.paths.registry_dir)
    }

    /// Default tracing filter when RUST_LOG is not set.
    pub fn log_filter(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.logging.level
        }
    }
}

pub fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
}
