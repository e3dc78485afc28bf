//! On-disk registry data: the index, agent records and the pending patch.
//!
//! A registry directory holds:
//! - `agents-index.json`: the list of known agents (source of truth)
//! - `NN-slug.json`: one record per agent, derived from the index
//! - `agent-improvements.json`: a patch waiting to be applied, if any
//!
//! Files are plain JSON without locking. Only one pipeline step may run
//! against a directory at a time.

pub mod index;
pub mod patch;
pub mod record;
pub mod store;

pub use index::{index_path, AgentDescriptor, Index, IndexMetadata, INDEX_FILE_NAME};
pub use patch::{patch_path, PatchDocument, PATCH_FILE_NAME};
pub use record::{AgentFields, AgentRecord};
pub use store::RecordStore;
