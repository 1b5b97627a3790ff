//! Retrieval plans and title-priority computation.
//!
//! Literal title matches are treated as strictly more relevant than raw
//! index rank, since queries are frequently verbatim titles. Title priority
//! is always computed over the original trimmed/lowercased query, never the
//! synonym-expanded token set.

use serde::{Deserialize, Serialize};

use crate::index::IndexPredicate;

/// Tie-break rank class reflecting how literally a title matches the query.
/// Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TitlePriority {
    /// Title equals the query (case/whitespace-insensitive).
    Exact = 1,
    /// Title is `"query - suffix"`.
    Suffixed = 2,
    /// Title starts with the query.
    Prefix = 3,
    /// Title contains the query.
    Substring = 4,
    /// Matched by the full-text predicate only.
    IndexOnly = 5,
}

impl TitlePriority {
    /// Classify a title against the trimmed/lowercased original query.
    pub fn of(title: &str, title_query: &str) -> Self {
        let title = title.trim().to_lowercase();
        let query = title_query.trim().to_lowercase();

        if query.is_empty() {
            TitlePriority::IndexOnly
        } else if title == query {
            TitlePriority::Exact
        } else if title.starts_with(&format!("{query} - ")) {
            TitlePriority::Suffixed
        } else if title.starts_with(&query) {
            TitlePriority::Prefix
        } else if title.contains(&query) {
            TitlePriority::Substring
        } else {
            TitlePriority::IndexOnly
        }
    }

    /// Numeric rank (1 = best).
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// The two retrieval shapes the engine supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchKind {
    /// Document-grouped text search.
    Text,
    /// Flat media search, no per-document grouping.
    Image,
}

/// An executable retrieval plan.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    pub kind: SearchKind,
    /// Boolean-OR predicate over the expanded token set.
    pub predicate: IndexPredicate,
    /// Trimmed, lowercased original query for title-priority computation.
    pub title_query: String,
    /// Final number of results after engine-side ordering.
    pub result_cap: usize,
    /// Rows requested from the index. Larger than `result_cap` because
    /// title-priority re-ranking happens after retrieval.
    pub fetch_limit: usize,
}

/// Builds retrieval plans from expanded token sets.
#[derive(Debug, Clone)]
pub struct QueryPlanner {
    text_cap: usize,
    image_cap: usize,
    fetch_factor: usize,
}

impl Default for QueryPlanner {
    fn default() -> Self {
        Self::new(10, 100, 10)
    }
}

impl QueryPlanner {
    /// Create a planner with the given result caps and over-fetch factor.
    pub fn new(text_cap: usize, image_cap: usize, fetch_factor: usize) -> Self {
        QueryPlanner {
            text_cap,
            image_cap,
            fetch_factor: fetch_factor.max(1),
        }
    }

    /// Build a plan for the given shape, original query, and expanded tokens.
    pub fn plan(&self, kind: SearchKind, raw_query: &str, expanded_tokens: Vec<String>) -> SearchPlan {
        let result_cap = match kind {
            SearchKind::Text => self.text_cap,
            SearchKind::Image => self.image_cap,
        };

        SearchPlan {
            kind,
            predicate: IndexPredicate::new(expanded_tokens),
            title_query: raw_query.trim().to_lowercase(),
            result_cap,
            fetch_limit: result_cap * self.fetch_factor,
        }
    }
}
