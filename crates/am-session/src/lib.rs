//! am-session - Management group session layer for assetmon
//!
//! This crate provides the `ManagementSession` trait every resolution stage
//! talks to, a DuckDB backend reading exported management group snapshots,
//! and (behind the `test-support` feature) an in-memory object graph.

pub mod error;
#[cfg(feature = "test-support")]
pub mod memory;
pub mod snapshot;
pub mod traits;
pub(crate) mod traversal;

pub use error::{SessionError, SessionResult};
#[cfg(feature = "test-support")]
pub use memory::MemoryGraph;
pub use snapshot::DuckDbSession;
pub use traits::ManagementSession;
