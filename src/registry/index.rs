//! The central agent index: descriptors, category grouping and metadata.

use crate::error::{RegistryError, Result};
use crate::utils::json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// File name of the index inside a registry directory.
pub const INDEX_FILE_NAME: &str = "agents-index.json";

/// One agent as listed in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub id: String,
    pub name: String,
    /// Record file name, `NN-slug.json`
    pub file: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl AgentDescriptor {
    /// Numeric sequence of this descriptor, if its id is a number.
    pub fn sequence(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    #[serde(default)]
    pub total_agents: usize,

    #[serde(default)]
    pub version: String,

    /// Last update, `YYYY-MM-DD`
    #[serde(default)]
    pub updated: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub agents: Vec<AgentDescriptor>,

    /// Category name -> record file names
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub metadata: IndexMetadata,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Index {
    /// Load and validate an index document.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RegistryError::MissingIndex(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let index = Self::parse(&contents).map_err(|reason| RegistryError::MalformedIndex {
            path: path.to_path_buf(),
            reason,
        })?;
        index.validate(path)?;
        Ok(index)
    }

    fn parse(contents: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(contents).map_err(|e| e.to_string())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        json::write_pretty(path, self)
    }

    /// Check identity invariants. Count and category drift are only logged.
    pub fn validate(&self, path: &Path) -> Result<()> {
        let malformed = |reason: String| RegistryError::MalformedIndex {
            path: path.to_path_buf(),
            reason,
        };

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for agent in &self.agents {
            if !names.insert(agent.name.as_str()) {
                return Err(RegistryError::DuplicateAgent(agent.name.clone()));
            }
            if !ids.insert(agent.id.as_str()) {
                return Err(malformed(format!("duplicate agent id '{}'", agent.id)));
            }
            if !is_bare_json_file_name(&agent.file) {
                return Err(malformed(format!(
                    "agent '{}' has invalid file name '{}'",
                    agent.name, agent.file
                )));
            }
        }

        if self.metadata.total_agents != self.agents.len() {
            tracing::warn!(
                index = %path.display(),
                declared = self.metadata.total_agents,
                listed = self.agents.len(),
                "metadata.total_agents does not match the number of agents"
            );
        }

        for file in self.dangling_category_files() {
            tracing::warn!(
                index = %path.display(),
                file,
                "category references a file with no agent descriptor"
            );
        }

        Ok(())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&AgentDescriptor> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Sequence number for the next appended agent: highest numeric id + 1.
    ///
    /// `None` when the highest id is already `u64::MAX`.
    pub fn next_sequence(&self) -> Option<u64> {
        match self.agents.iter().filter_map(AgentDescriptor::sequence).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Category file names that no descriptor points at.
    pub fn dangling_category_files(&self) -> Vec<&str> {
        let files: HashSet<&str> = self.agents.iter().map(|a| a.file.as_str()).collect();
        self.categories
            .values()
            .flatten()
            .map(String::as_str)
            .filter(|f| !files.contains(f))
            .collect()
    }

    /// Append a descriptor and register its file under its category.
    ///
    /// Rejects a name that is already listed. Keeps `total_agents` in step.
    pub fn append(&mut self, descriptor: AgentDescriptor) -> Result<()> {
        if self.contains_name(&descriptor.name) {
            return Err(RegistryError::DuplicateAgent(descriptor.name));
        }

        if !descriptor.category.is_empty() {
            let members = self
                .categories
                .entry(descriptor.category.clone())
                .or_default();
            if !members.contains(&descriptor.file) {
                members.push(descriptor.file.clone());
            }
        }

        self.agents.push(descriptor);
        self.metadata.total_agents = self.agents.len();
        Ok(())
    }
}

/// Path of the index inside a registry directory.
pub fn index_path(registry_dir: &Path) -> PathBuf {
    registry_dir.join(INDEX_FILE_NAME)
}

fn is_bare_json_file_name(file: &str) -> bool {
    file.ends_with(".json")
        && !file.contains('/')
        && !file.contains('\\')
        && file != INDEX_FILE_NAME
        && !file.starts_with('.')
}
