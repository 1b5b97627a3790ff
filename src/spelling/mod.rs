//! Spelling correction for user queries.
//!
//! The corrector is advisory only: a suggested rewrite is returned alongside
//! search results but is never substituted into the retrieval predicate.

pub mod corrector;
pub mod similarity;
pub mod vocabulary;

// Re-export commonly used types
pub use corrector::*;
pub use similarity::*;
pub use vocabulary::*;
