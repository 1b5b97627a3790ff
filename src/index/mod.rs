//! Boundary to the external full-text index.
//!
//! The index itself (storage, crawling, FTS ranking) lives outside this
//! crate; this module defines the read-only contract the engine consumes:
//! title lookup, boolean-OR ranked retrieval, and bulk sampling for
//! vocabulary construction. [`MemoryIndex`] provides an in-process
//! implementation used by the test suites and embedded deployments.

pub mod memory;

pub use memory::*;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Delimiter used by the index to concatenate media URLs into a single
/// column per retrieval row.
pub const MEDIA_DELIMITER: &str = "|||";

/// Read-only projection of an indexed document. Owned and mutated only by
/// the external index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Index-assigned document id.
    pub id: u64,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub favicon: Option<String>,
}

/// One retrieval row: a document plus its media URLs concatenated with
/// [`MEDIA_DELIMITER`]. Rows arrive in descending index-relevance order;
/// the row position is the index rank.
#[derive(Debug, Clone, PartialEq)]
pub struct PageHit {
    pub page: PageRecord,
    pub media: Option<String>,
}

/// Title/description pair sampled for vocabulary construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSample {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Boolean-OR token predicate sent to the full-text engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexPredicate {
    terms: Vec<String>,
}

impl IndexPredicate {
    /// Create a predicate over the given terms.
    pub fn new(terms: Vec<String>) -> Self {
        IndexPredicate { terms }
    }

    /// The predicate terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// A predicate with no terms matches nothing and must never reach the
    /// index.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl fmt::Display for IndexPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.terms.join(" OR "))
    }
}

/// Read-only contract with the external full-text index.
pub trait SearchIndex: Send + Sync {
    /// Look up a single document by title with precedence: exact
    /// (case/whitespace-insensitive), then `"title - suffix"`, then
    /// substring.
    fn lookup_title(&self, query: &str) -> Result<Option<PageRecord>>;

    /// Execute a boolean-OR token query, returning up to `limit` rows in
    /// descending relevance order with media joined in.
    fn search(&self, predicate: &IndexPredicate, limit: usize) -> Result<Vec<PageHit>>;

    /// Bulk-sample up to `limit` title/description pairs.
    fn sample_pages(&self, limit: usize) -> Result<Vec<PageSample>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_display() {
        let predicate = IndexPredicate::new(vec!["pic".to_string(), "picture".to_string()]);
        assert_eq!(predicate.to_string(), "pic OR picture");
    }

    #[test]
    fn test_empty_predicate() {
        assert!(IndexPredicate::default().is_empty());
        assert!(!IndexPredicate::new(vec!["a".to_string()]).is_empty());
    }
}
