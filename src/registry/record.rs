//! Per-agent record documents.

use crate::error::{RegistryError, Result};
use crate::utils::json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// The behavioural part of a record: what a patch replaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFields {
    pub tools: Vec<String>,
    pub instructions: String,
    pub examples: Vec<String>,
}

/// A full agent record as written to the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tools: Vec<String>,

    #[serde(default)]
    pub instructions: String,

    #[serde(default)]
    pub examples: Vec<String>,

    /// Keys written by other tools, kept as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AgentRecord {
    pub fn new(name: &str, description: &str, fields: AgentFields) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            tools: fields.tools,
            instructions: fields.instructions,
            examples: fields.examples,
            extra: BTreeMap::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| RegistryError::MalformedRecord {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        json::write_pretty(path, self)
    }

    /// Replace tools, instructions and examples. Identity fields stay put.
    pub fn apply(&mut self, fields: &AgentFields) {
        self.tools = fields.tools.clone();
        self.instructions = fields.instructions.clone();
        self.examples = fields.examples.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(tools: &[&str]) -> AgentFields {
        AgentFields {
            tools: tools.iter().map(|t| t.to_string()).collect(),
            instructions: "Audit code for vulnerabilities.".to_string(),
            examples: vec!["Fix SQL injection".to_string()],
        }
    }

    #[test]
    fn test_field_order_on_disk() {
        let record = AgentRecord::new(
            "Security Guardian",
            "Audit code",
            fields(&["codebase_search"]),
        );
        let rendered = json::to_pretty_string(&record).unwrap();

        let positions: Vec<usize> = ["\"name\"", "\"description\"", "\"tools\"", "\"instructions\"", "\"examples\""]
            .iter()
            .map(|key| rendered.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_apply_keeps_identity_and_extras() {
        let mut record: AgentRecord = serde_json::from_str(
            r#"{"name": "Security Guardian", "description": "Audit code", "tools": ["read_file"],
                "instructions": "old", "examples": [], "model": "fast"}"#,
        )
        .unwrap();

        record.apply(&fields(&["codebase_search", "grep_search"]));

        assert_eq!(record.name, "Security Guardian");
        assert_eq!(record.description, "Audit code");
        assert_eq!(record.tools, vec!["codebase_search", "grep_search"]);
        assert_eq!(record.instructions, "Audit code for vulnerabilities.");
        assert_eq!(record.extra["model"], "fast");
    }

    #[test]
    fn test_load_malformed_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("04-security-guardian.json");
        std::fs::write(&path, "not json").unwrap();
        let err = AgentRecord::load(&path).unwrap_err();
        assert!(matches!(err, RegistryError::MalformedRecord { .. }));
    }
}
