use super::helpers;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{self, ApplyReport};
use std::path::Path;

pub fn execute(config: &Config, dir: Option<&Path>) -> Result<()> {
    let registry_dir = helpers::registry_dir(config, dir);
    let report = pipeline::apply(&registry_dir)?;
    print_report(&report);
    Ok(())
}

pub(crate) fn print_report(report: &ApplyReport) {
    if !report.removed_patch {
        println!("Nothing to apply.");
        return;
    }

    for file in &report.updated_files {
        if let Some(name) = file.file_name() {
            println!("✓ Improved: {}", name.to_string_lossy());
        }
    }
    for warning in &report.warnings {
        println!("⚠ {}", warning);
    }
    println!("✓ Updated {} agents", report.updated);
    println!("✓ Patch document removed");
}
