use super::helpers;
use crate::catalogue::ImprovementCatalogue;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{check_consistency, PipelineState};
use std::path::Path;

pub fn execute(config: &Config, dir: Option<&Path>) -> Result<()> {
    let registry_dir = helpers::registry_dir(config, dir);
    let state = PipelineState::detect(&registry_dir, ImprovementCatalogue::builtin()?)?;

    println!("Registry: {}", registry_dir.display());
    println!("State: {}", state);

    if state == PipelineState::Empty {
        println!("\nNo index found. Run 'agent-registry generate' first.");
        return Ok(());
    }
    if state == PipelineState::Proposed {
        println!("Pending patch: run 'agent-registry apply' to merge it.");
    }

    let report = check_consistency(&registry_dir)?;
    if report.is_consistent() {
        println!("\n✓ Index and records are consistent");
        return Ok(());
    }

    println!("\n✗ Index and records disagree:");
    for file in &report.missing_records {
        println!("  - missing record file: {}", file);
    }
    for mismatch in &report.name_mismatches {
        println!(
            "  - {} names '{}', index expects '{}'",
            mismatch.file, mismatch.found, mismatch.expected
        );
    }
    for path in &report.orphan_records {
        println!("  - record not in index: {}", path.display());
    }
    for file in &report.dangling_category_files {
        println!("  - category lists unknown file: {}", file);
    }
    if let Some((declared, listed)) = report.count_mismatch {
        println!(
            "  - metadata.total_agents is {} but {} agents are listed",
            declared, listed
        );
    }
    println!("\nRe-run 'agent-registry generate' to rebuild records from the index.");

    Ok(())
}
