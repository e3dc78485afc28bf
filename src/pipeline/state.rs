//! Where a registry directory stands in the pipeline, and whether its
//! index and record files agree.

use crate::catalogue::ImprovementCatalogue;
use crate::error::Result;
use crate::registry::{index_path, patch_path, AgentRecord, Index, RecordStore};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No index in the registry directory
    Empty,
    /// Records generated, no improvement round yet
    Generated,
    /// Patch document waiting to be applied
    Proposed,
    /// Improvement round applied, no pending patch
    Synced,
}

impl PipelineState {
    pub fn detect(registry_dir: &Path, catalogue: &ImprovementCatalogue) -> Result<Self> {
        if patch_path(registry_dir).exists() {
            return Ok(PipelineState::Proposed);
        }

        let index_file = index_path(registry_dir);
        if !index_file.exists() {
            return Ok(PipelineState::Empty);
        }

        let index = Index::load(&index_file)?;
        let improved = catalogue
            .new_agents()
            .iter()
            .all(|agent| index.contains_name(&agent.name));

        Ok(if improved {
            PipelineState::Synced
        } else {
            PipelineState::Generated
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Empty => "empty",
            PipelineState::Generated => "generated",
            PipelineState::Proposed => "proposed",
            PipelineState::Synced => "synced",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMismatch {
    pub file: String,
    pub expected: String,
    pub found: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Index entries whose record file does not exist
    pub missing_records: Vec<String>,
    pub name_mismatches: Vec<NameMismatch>,
    /// Record files no index entry points at
    pub orphan_records: Vec<PathBuf>,
    pub dangling_category_files: Vec<String>,
    /// `(declared, listed)` when `metadata.total_agents` is off
    pub count_mismatch: Option<(usize, usize)>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.missing_records.is_empty()
            && self.name_mismatches.is_empty()
            && self.orphan_records.is_empty()
            && self.dangling_category_files.is_empty()
            && self.count_mismatch.is_none()
    }
}

/// Compare the index in `registry_dir` with the record files next to it.
pub fn check_consistency(registry_dir: &Path) -> Result<ConsistencyReport> {
    let index = Index::load(&index_path(registry_dir))?;
    let store = RecordStore::new(registry_dir);
    let mut report = ConsistencyReport::default();

    for descriptor in &index.agents {
        let path = store.path_for(&descriptor.file);
        if !path.is_file() {
            report.missing_records.push(descriptor.file.clone());
            continue;
        }
        let record = AgentRecord::load(&path)?;
        if record.name != descriptor.name {
            report.name_mismatches.push(NameMismatch {
                file: descriptor.file.clone(),
                expected: descriptor.name.clone(),
                found: record.name,
            });
        }
    }

    let indexed: HashSet<&str> = index.agents.iter().map(|a| a.file.as_str()).collect();
    for path in store.record_files()? {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if !indexed.contains(name) {
            report.orphan_records.push(path);
        }
    }

    report.dangling_category_files = index
        .dangling_category_files()
        .into_iter()
        .map(str::to_string)
        .collect();

    if index.metadata.total_agents != index.agents.len() {
        report.count_mismatch = Some((index.metadata.total_agents, index.agents.len()));
    }

    Ok(report)
}
