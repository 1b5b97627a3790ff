//! Search service orchestration.
//!
//! Wires the analysis, spelling, planning, assembly, personalization, and
//! caching components into the two exposed operations: text search and
//! image search.

pub mod config;
pub mod search;
pub mod types;

pub use config::*;
pub use search::*;
pub use types::*;
