use super::helpers;
use crate::catalogue::ImprovementCatalogue;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{ProposeReport, Proposer};
use std::path::Path;

pub fn execute(config: &Config, dir: Option<&Path>) -> Result<()> {
    let registry_dir = helpers::registry_dir(config, dir);
    let catalogue = ImprovementCatalogue::builtin()?;

    let report = Proposer::new(catalogue).propose(&registry_dir)?;
    print_report(&report);

    Ok(())
}

pub(crate) fn print_report(report: &ProposeReport) {
    println!("✓ Created {} new agents:", report.new_agents.len());
    for agent in &report.new_agents {
        println!("  - {} ({})", agent.file, agent.category);
    }
    println!(
        "✓ Index now lists {} agents (version {})",
        report.total_agents, report.version
    );
    println!(
        "✓ Staged improvements for {} agents in {}",
        report.patched_agents,
        report.patch_path.display()
    );
}
