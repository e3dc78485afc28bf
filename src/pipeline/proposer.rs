//! Add the catalogue's new agents to a registry and stage its patch.

use crate::catalogue::ImprovementCatalogue;
use crate::error::{RegistryError, Result};
use crate::registry::{
    index_path, patch_path, AgentDescriptor, AgentRecord, Index, PatchDocument, RecordStore,
};
use crate::utils::slug;
use crate::version;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// Everything a proposal will write, computed before touching disk.
#[derive(Debug, Clone)]
pub struct Proposal {
    pub new_agents: Vec<(AgentDescriptor, AgentRecord)>,
    /// The index with new descriptors appended and metadata bumped
    pub index: Index,
    pub patch: PatchDocument,
}

#[derive(Debug, Clone)]
pub struct ProposeReport {
    pub new_agents: Vec<AgentDescriptor>,
    pub records: Vec<PathBuf>,
    pub patch_path: PathBuf,
    pub patched_agents: usize,
    pub total_agents: usize,
    pub version: String,
}

pub struct Proposer<'a> {
    catalogue: &'a ImprovementCatalogue,
    today: NaiveDate,
}

impl<'a> Proposer<'a> {
    pub fn new(catalogue: &'a ImprovementCatalogue) -> Self {
        Self {
            catalogue,
            today: Local::now().date_naive(),
        }
    }

    /// Use a fixed date for `metadata.updated`.
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Validate and build the proposal against the current index.
    ///
    /// Fails only on a name already in the index. Record files left on disk
    /// by an earlier round are regenerated.
    pub fn plan(&self, index: &Index, store: &RecordStore, index_file: &Path) -> Result<Proposal> {
        let mut updated = index.clone();
        let mut new_agents = Vec::with_capacity(self.catalogue.new_agents().len());
        let first = index
            .next_sequence()
            .ok_or_else(|| sequence_overflow(index_file))?;

        for (offset, agent) in self.catalogue.new_agents().iter().enumerate() {
            if updated.contains_name(&agent.name) {
                return Err(RegistryError::DuplicateAgent(agent.name.clone()));
            }

            let sequence = first
                .checked_add(offset as u64)
                .ok_or_else(|| sequence_overflow(index_file))?;
            let file = slug::record_file_name(sequence, &agent.name);
            let path = store.path_for(&file);
            if path.exists() {
                tracing::warn!(file = %path.display(), "overwriting unindexed record file");
            }

            let descriptor = AgentDescriptor {
                id: sequence.to_string(),
                name: agent.name.clone(),
                file,
                category: agent.category.clone(),
                description: agent.description.clone(),
            };
            let record = AgentRecord::new(&agent.name, &agent.description, agent.fields());

            updated.append(descriptor.clone())?;
            new_agents.push((descriptor, record));
        }

        updated.metadata.total_agents = updated.agents.len();
        updated.metadata.version = version::bump_major(&index.metadata.version);
        updated.metadata.updated = self.today.format("%Y-%m-%d").to_string();

        Ok(Proposal {
            new_agents,
            index: updated,
            patch: self.catalogue.patch().clone(),
        })
    }

    /// Run one improvement round against a registry directory.
    ///
    /// Writes new records, then the index, then the patch document. Nothing
    /// is written if planning fails.
    pub fn propose(&self, registry_dir: &Path) -> Result<ProposeReport> {
        let index_file = index_path(registry_dir);
        let index = Index::load(&index_file)?;
        let store = RecordStore::new(registry_dir);

        let proposal = self.plan(&index, &store, &index_file)?;

        let mut records = Vec::with_capacity(proposal.new_agents.len());
        for (descriptor, record) in &proposal.new_agents {
            records.push(store.write(&descriptor.file, record)?);
            tracing::info!(file = %descriptor.file, "created agent record");
        }

        proposal.index.save(&index_file)?;
        tracing::info!(
            index = %index_file.display(),
            total_agents = proposal.index.metadata.total_agents,
            version = %proposal.index.metadata.version,
            "updated index"
        );

        let patch_file = patch_path(registry_dir);
        proposal.patch.save(&patch_file)?;
        tracing::info!(
            patch = %patch_file.display(),
            entries = proposal.patch.len(),
            "staged improvements"
        );

        Ok(ProposeReport {
            new_agents: proposal.new_agents.into_iter().map(|(d, _)| d).collect(),
            records,
            patch_path: patch_file,
            patched_agents: proposal.patch.len(),
            total_agents: proposal.index.metadata.total_agents,
            version: proposal.index.metadata.version,
        })
    }
}

fn sequence_overflow(index_file: &Path) -> RegistryError {
    RegistryError::MalformedIndex {
        path: index_file.to_path_buf(),
        reason: "agent ids leave no room for another sequence number".to_string(),
    }
}
