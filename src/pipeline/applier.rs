//! Apply a pending patch document to the record store and retire it.

use crate::error::{RegistryError, Result};
use crate::registry::{index_path, patch_path, AgentRecord, Index, PatchDocument, RecordStore};
use std::fmt;
use std::path::{Path, PathBuf};

/// A patch entry that was skipped without failing the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyWarning {
    RecordNotFound { agent: String },
}

impl fmt::Display for ApplyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyWarning::RecordNotFound { agent } => {
                write!(f, "No record file found for agent '{}'", agent)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    pub updated: usize,
    pub updated_files: Vec<PathBuf>,
    pub warnings: Vec<ApplyWarning>,
    pub removed_patch: bool,
}

/// Apply the patch staged in `registry_dir`, if any.
///
/// Every entry is resolved and every target record loaded before the first
/// write. Ambiguous or unreadable targets abort the run with no record
/// changed and the patch kept. Unresolvable names are skipped with a
/// warning. On success the patch document is deleted; with no patch
/// present this is a no-op.
pub fn apply(registry_dir: &Path) -> Result<ApplyReport> {
    let patch_file = patch_path(registry_dir);
    let Some(patch) = PatchDocument::load(&patch_file)? else {
        tracing::info!(patch = %patch_file.display(), "no pending patch, nothing to apply");
        return Ok(ApplyReport::default());
    };
    if patch.is_empty() {
        tracing::info!(patch = %patch_file.display(), "patch document has no entries");
    }

    let store = RecordStore::new(registry_dir);
    let index_file = index_path(registry_dir);
    let index = if index_file.exists() {
        Some(Index::load(&index_file)?)
    } else {
        None
    };

    let mut planned: Vec<(PathBuf, AgentRecord)> = Vec::new();
    let mut warnings = Vec::new();

    for (agent, fields) in &patch.entries {
        let Some(path) = resolve_record(&store, index.as_ref(), agent)? else {
            let warning = ApplyWarning::RecordNotFound {
                agent: agent.clone(),
            };
            tracing::warn!("{}", warning);
            warnings.push(warning);
            continue;
        };

        match planned.iter_mut().find(|(p, _)| *p == path) {
            Some((_, record)) => record.apply(fields),
            None => {
                let mut record = AgentRecord::load(&path)?;
                record.apply(fields);
                planned.push((path, record));
            }
        }
    }

    let mut updated_files = Vec::with_capacity(planned.len());
    for (path, record) in planned {
        record.save(&path)?;
        tracing::info!(file = %path.display(), agent = %record.name, "applied patch");
        updated_files.push(path);
    }

    std::fs::remove_file(&patch_file).map_err(|e| RegistryError::write_failure(&patch_file, e))?;
    tracing::info!(patch = %patch_file.display(), "removed patch document");

    Ok(ApplyReport {
        updated: updated_files.len(),
        updated_files,
        warnings,
        removed_patch: true,
    })
}

/// Find the record file for an agent name.
///
/// The index entry wins when its file exists. Otherwise record files are
/// matched on the name's slug; more than one match is an error.
pub fn resolve_record(
    store: &RecordStore,
    index: Option<&Index>,
    agent: &str,
) -> Result<Option<PathBuf>> {
    if let Some(descriptor) = index.and_then(|i| i.find_by_name(agent)) {
        let path = store.path_for(&descriptor.file);
        if path.is_file() {
            return Ok(Some(path));
        }
        tracing::debug!(
            agent,
            file = %descriptor.file,
            "indexed record file missing, scanning record store"
        );
    }

    let mut candidates = store.find_by_slug(agent)?;
    match candidates.len() {
        0 => Ok(None),
        1 => Ok(candidates.pop()),
        _ => Err(RegistryError::AmbiguousRecord {
            agent: agent.to_string(),
            candidates,
        }),
    }
}
