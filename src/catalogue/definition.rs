//! Data structures for parsing the embedded catalogue TOML files.

use crate::registry::AgentFields;
use serde::Deserialize;
use std::collections::BTreeMap;

/// `catalogue/defaults.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsFile {
    #[serde(rename = "agent", default)]
    pub agents: Vec<RoleDefaults>,
}

/// Tools, instructions and examples for one well-known role.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleDefaults {
    pub name: String,
    pub tools: Vec<String>,
    pub instructions: String,
    pub examples: Vec<String>,
}

impl RoleDefaults {
    pub fn fields(&self) -> AgentFields {
        AgentFields {
            tools: self.tools.clone(),
            instructions: self.instructions.clone(),
            examples: self.examples.clone(),
        }
    }
}

/// `catalogue/improvements.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct ImprovementsFile {
    #[serde(rename = "new_agent", default)]
    pub new_agents: Vec<NewAgent>,

    /// Existing role name -> replacement fields
    #[serde(default)]
    pub patch: BTreeMap<String, AgentFields>,
}

/// A role to be added to the index.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewAgent {
    pub name: String,
    pub description: String,
    pub category: String,
    pub tools: Vec<String>,
    pub instructions: String,
    pub examples: Vec<String>,
}

impl NewAgent {
    pub fn fields(&self) -> AgentFields {
        AgentFields {
            tools: self.tools.clone(),
            instructions: self.instructions.clone(),
            examples: self.examples.clone(),
        }
    }
}
