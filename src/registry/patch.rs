//! The pending patch document: agent name -> replacement fields.

use super::record::AgentFields;
use crate::error::{RegistryError, Result};
use crate::utils::json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the patch document inside a registry directory.
pub const PATCH_FILE_NAME: &str = "agent-improvements.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument {
    pub entries: BTreeMap<String, AgentFields>,
}

impl PatchDocument {
    /// Load a pending patch. A missing file means nothing is pending.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| RegistryError::MalformedPatch {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        json::write_pretty(path, self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Path of the patch document inside a registry directory.
pub fn patch_path(registry_dir: &Path) -> PathBuf {
    registry_dir.join(PATCH_FILE_NAME)
}
