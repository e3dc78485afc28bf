//! Materialise one record file per index entry.

use crate::catalogue::DefaultsCatalogue;
use crate::error::{RegistryError, Result};
use crate::registry::{index_path, AgentDescriptor, AgentRecord, Index, RecordStore};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    /// Written record files, in index order
    pub records: Vec<PathBuf>,
    pub index_copy: PathBuf,
}

pub struct Generator<'a> {
    catalogue: &'a DefaultsCatalogue,
}

impl<'a> Generator<'a> {
    pub fn new(catalogue: &'a DefaultsCatalogue) -> Self {
        Self { catalogue }
    }

    /// Record for one descriptor: its identity plus catalogue defaults.
    pub fn build_record(&self, descriptor: &AgentDescriptor) -> AgentRecord {
        let fields = self.catalogue.resolve(&descriptor.name);
        AgentRecord::new(&descriptor.name, &descriptor.description, fields)
    }

    /// Load the index at `source` and generate into `output_dir`.
    pub fn generate(&self, source: &Path, output_dir: &Path) -> Result<GenerateReport> {
        let index = Index::load(source)?;
        self.generate_index(&index, source, output_dir)
    }

    /// Write every record of an already loaded index, then copy the index.
    ///
    /// Existing files are overwritten. The first failed write aborts the run
    /// and leaves earlier files in place.
    pub fn generate_index(
        &self,
        index: &Index,
        source: &Path,
        output_dir: &Path,
    ) -> Result<GenerateReport> {
        let store = RecordStore::create(output_dir)?;

        let mut records = Vec::with_capacity(index.agents.len());
        for descriptor in &index.agents {
            let record = self.build_record(descriptor);
            let path = store.write(&descriptor.file, &record)?;
            tracing::info!(file = %descriptor.file, "generated agent record");
            records.push(path);
        }

        let index_copy = copy_index(source, output_dir)?;

        Ok(GenerateReport {
            records,
            index_copy,
        })
    }
}

/// Copy the source index byte for byte next to the generated records.
fn copy_index(source: &Path, output_dir: &Path) -> Result<PathBuf> {
    let destination = index_path(output_dir);

    if is_same_file(source, &destination) {
        tracing::debug!(index = %destination.display(), "index already in output directory");
        return Ok(destination);
    }

    let contents = std::fs::read(source)?;
    std::fs::write(&destination, contents)
        .map_err(|e| RegistryError::write_failure(&destination, e))?;
    tracing::info!(index = %destination.display(), "copied index");

    Ok(destination)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
