//! Directory of agent record files.

use super::index::INDEX_FILE_NAME;
use super::patch::PATCH_FILE_NAME;
use super::record::AgentRecord;
use crate::error::{RegistryError, Result};
use crate::utils::slug;
use std::path::{Path, PathBuf};

/// A registry directory holding one JSON record per agent.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the store, creating the directory if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| RegistryError::write_failure(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    pub fn write(&self, file: &str, record: &AgentRecord) -> Result<PathBuf> {
        let path = self.path_for(file);
        record.save(&path)?;
        Ok(path)
    }

    /// Record files in the directory, sorted by file name.
    ///
    /// The index and the patch document are never listed.
    pub fn record_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if path.is_file() && is_record_file_name(name) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Record files whose name contains the slug of `agent_name`.
    pub fn find_by_slug(&self, agent_name: &str) -> Result<Vec<PathBuf>> {
        Ok(self
            .record_files()?
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| slug::matches_name(n, agent_name))
            })
            .collect())
    }
}

fn is_record_file_name(name: &str) -> bool {
    name.ends_with(".json") && name != INDEX_FILE_NAME && name != PATCH_FILE_NAME
}
