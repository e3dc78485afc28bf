use super::{apply, generate, helpers, improve};
use crate::catalogue::{DefaultsCatalogue, ImprovementCatalogue};
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{self, Generator, Proposer};
use std::path::Path;

/// Generate, improve and apply against one registry directory.
///
/// Each run starts again from the source index, so repeated runs converge on
/// the same registry.
pub fn execute(config: &Config, index: Option<&Path>, dir: Option<&Path>) -> Result<()> {
    let index_path = index
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.index_path());
    let registry_dir = helpers::registry_dir(config, dir);

    println!("==> generate");
    let generated = Generator::new(DefaultsCatalogue::builtin()?).generate(&index_path, &registry_dir)?;
    generate::print_report(&generated, &registry_dir);

    println!("\n==> improve");
    let proposed = Proposer::new(ImprovementCatalogue::builtin()?).propose(&registry_dir)?;
    improve::print_report(&proposed);

    println!("\n==> apply");
    let applied = pipeline::apply(&registry_dir)?;
    apply::print_report(&applied);

    Ok(())
}
