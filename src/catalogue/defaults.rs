//! Name -> defaults lookup used when materialising records.

use super::definition::DefaultsFile;
use crate::error::{RegistryError, Result};
use crate::registry::AgentFields;
use once_cell::sync::OnceCell;
use std::collections::HashMap;

/// Tools given to roles the catalogue does not know.
pub const GENERIC_TOOLS: [&str; 3] = ["codebase_search", "read_file", "edit_file"];

static BUILTIN: OnceCell<DefaultsCatalogue> = OnceCell::new();

/// Read-only table of per-role defaults.
#[derive(Debug, Clone, Default)]
pub struct DefaultsCatalogue {
    roles: HashMap<String, AgentFields>,
}

impl DefaultsCatalogue {
    /// The catalogue compiled into the binary, parsed on first use.
    pub fn builtin() -> Result<&'static Self> {
        BUILTIN.get_or_try_init(|| Self::from_toml(include_str!("../../catalogue/defaults.toml")))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: DefaultsFile = toml::from_str(contents).map_err(|e| {
            RegistryError::Catalogue(format!("Failed to parse defaults catalogue: {}", e))
        })?;

        let mut roles = HashMap::new();
        for role in &file.agents {
            if role.name.trim().is_empty() {
                return Err(RegistryError::Catalogue(
                    "Defaults entry name cannot be empty".to_string(),
                ));
            }
            if role.tools.is_empty() {
                return Err(RegistryError::Catalogue(format!(
                    "Defaults entry '{}' has no tools",
                    role.name
                )));
            }
            if roles.insert(role.name.clone(), role.fields()).is_some() {
                return Err(RegistryError::Catalogue(format!(
                    "Defaults entry '{}' is listed twice",
                    role.name
                )));
            }
        }

        Ok(Self { roles })
    }

    pub fn get(&self, name: &str) -> Option<&AgentFields> {
        self.roles.get(name)
    }

    /// Catalogue entry for `name`, or the generic default built from it.
    pub fn resolve(&self, name: &str) -> AgentFields {
        match self.get(name) {
            Some(fields) => fields.clone(),
            None => {
                tracing::debug!(agent = name, "no catalogue entry, using generic defaults");
                generic_defaults(name)
            }
        }
    }
}

pub fn generic_defaults(name: &str) -> AgentFields {
    AgentFields {
        tools: GENERIC_TOOLS.iter().map(|t| t.to_string()).collect(),
        instructions: format!(
            "Specialized agent for {} tasks. Focus on best practices and efficient solutions.",
            name
        ),
        examples: vec![
            format!("Example task for {}", name),
            format!("Another example for {}", name),
            format!("Advanced {} scenario", name),
            format!("Complex {} implementation", name),
        ],
    }
}
