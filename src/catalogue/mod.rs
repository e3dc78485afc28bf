//! Static catalogues compiled into the binary.
//!
//! Both tables live as TOML under `catalogue/` and are parsed once per
//! process, then shared read-only.
//!
//! ```toml
//! [[agent]]
//! name = "Code Architect"
//! tools = ["codebase_search", "read_file", "edit_file", "terminal"]
//! instructions = "Focus on high-level system design..."
//! examples = ["Design a microservices architecture..."]
//! ```

pub mod defaults;
pub mod definition;
pub mod improvements;

pub use defaults::{generic_defaults, DefaultsCatalogue};
pub use definition::NewAgent;
pub use improvements::ImprovementCatalogue;
