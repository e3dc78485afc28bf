//! The improvement round: new roles plus field replacements for existing ones.

use super::definition::{ImprovementsFile, NewAgent};
use crate::error::{RegistryError, Result};
use crate::registry::PatchDocument;
use once_cell::sync::OnceCell;
use std::collections::HashSet;

static BUILTIN: OnceCell<ImprovementCatalogue> = OnceCell::new();

#[derive(Debug, Clone, Default)]
pub struct ImprovementCatalogue {
    new_agents: Vec<NewAgent>,
    patch: PatchDocument,
}

impl ImprovementCatalogue {
    pub fn builtin() -> Result<&'static Self> {
        BUILTIN.get_or_try_init(|| {
            Self::from_toml(include_str!("../../catalogue/improvements.toml"))
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ImprovementsFile = toml::from_str(contents).map_err(|e| {
            RegistryError::Catalogue(format!("Failed to parse improvement catalogue: {}", e))
        })?;
        Self::new(
            file.new_agents,
            PatchDocument {
                entries: file.patch,
            },
        )
    }

    pub fn new(new_agents: Vec<NewAgent>, patch: PatchDocument) -> Result<Self> {
        let mut names = HashSet::new();
        for agent in &new_agents {
            if agent.name.trim().is_empty() || agent.category.trim().is_empty() {
                return Err(RegistryError::Catalogue(format!(
                    "New agent '{}' needs a name and a category",
                    agent.name
                )));
            }
            if !names.insert(agent.name.as_str()) {
                return Err(RegistryError::Catalogue(format!(
                    "New agent '{}' is listed twice",
                    agent.name
                )));
            }
            if patch.entries.contains_key(&agent.name) {
                return Err(RegistryError::Catalogue(format!(
                    "Agent '{}' is both new and patched",
                    agent.name
                )));
            }
        }

        Ok(Self { new_agents, patch })
    }

    pub fn new_agents(&self) -> &[NewAgent] {
        &self.new_agents
    }

    pub fn patch(&self) -> &PatchDocument {
        &self.patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_loads() {
        let catalogue = ImprovementCatalogue::builtin().unwrap();
        let names: Vec<_> = catalogue.new_agents().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Research Specialist",
                "Architecture Analyst",
                "Performance Analyst",
                "Code Quality Inspector",
                "Technology Trend Analyst",
            ]
        );
        assert_eq!(catalogue.patch().len(), 4);
    }

    #[test]
    fn test_builtin_security_guardian_patch() {
        let catalogue = ImprovementCatalogue::builtin().unwrap();
        let fields = &catalogue.patch().entries["Security Guardian"];
        assert_eq!(fields.tools.len(), 6);
        assert_eq!(fields.examples.len(), 5);
        assert!(fields
            .instructions
            .starts_with("Specialize in application security"));
        assert!(fields.instructions.ends_with("penetration testing"));
    }

    #[test]
    fn test_rejects_agent_both_new_and_patched() {
        let contents = r#"
[[new_agent]]
name = "Bug Hunter"
description = "Find bugs"
category = "Debugging"
tools = ["terminal"]
instructions = "Find bugs"
examples = []

[patch."Bug Hunter"]
tools = ["terminal"]
instructions = "Find more bugs"
examples = []
"#;
        let err = ImprovementCatalogue::from_toml(contents).unwrap_err();
        assert!(matches!(err, RegistryError::Catalogue(_)));
    }
}
