use super::helpers;
use crate::catalogue::DefaultsCatalogue;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{GenerateReport, Generator};
use crate::registry::Index;
use std::io;
use std::path::Path;

pub fn execute(config: &Config, index: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let index_path = index
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.index_path());

    // Fail on a missing or malformed index before asking anything
    let loaded = Index::load(&index_path)?;
    println!(
        "Found {} agents in {}",
        loaded.agents.len(),
        index_path.display()
    );

    let output_dir = match output {
        Some(dir) => dir.to_path_buf(),
        None => {
            let stdin = io::stdin();
            let choice = helpers::prompt_output_dir(
                &mut stdin.lock(),
                &mut io::stdout(),
                &config.registry_dir(),
            )?;
            match choice {
                Some(dir) => dir,
                None => {
                    println!("Operation cancelled.");
                    return Ok(());
                }
            }
        }
    };

    let catalogue = DefaultsCatalogue::builtin()?;
    let report = Generator::new(catalogue).generate_index(&loaded, &index_path, &output_dir)?;
    print_report(&report, &output_dir);

    Ok(())
}

pub(crate) fn print_report(report: &GenerateReport, output_dir: &Path) {
    let location = output_dir
        .canonicalize()
        .unwrap_or_else(|_| output_dir.to_path_buf());

    println!();
    println!("✓ Generated {} agent records in {}", report.records.len(), location.display());
    for record in &report.records {
        if let Some(name) = record.file_name() {
            println!("  - {}", name.to_string_lossy());
        }
    }
    println!("✓ Index written to {}", report.index_copy.display());
}
