//! Query planning for Sagitta.
//!
//! Turns an expanded token set plus the original query into an executable
//! retrieval plan: the boolean-OR index predicate and the title-priority
//! tie-break parameters.

pub mod planner;

pub use planner::*;
