//! The three-step registry pipeline.
//!
//! ```text
//! EMPTY --generate--> GENERATED --propose--> PROPOSED --apply--> SYNCED
//! ```
//!
//! - [`generator`] writes one record per index entry plus a copy of the index
//! - [`proposer`] appends new agents to the index and stages a patch document
//! - [`applier`] merges the staged patch into existing records and deletes it
//!
//! Steps are synchronous and assume a single writer per registry directory.
//! A crash between writes can leave the index and records out of step;
//! re-running `generate` restores the records from the index.

pub mod applier;
pub mod generator;
pub mod proposer;
pub mod state;

pub use applier::{apply, ApplyReport, ApplyWarning};
pub use generator::{GenerateReport, Generator};
pub use proposer::{Proposal, ProposeReport, Proposer};
pub use state::{check_consistency, ConsistencyReport, PipelineState};
