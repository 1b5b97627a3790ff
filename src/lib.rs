//! # Sagitta
//!
//! A query processing and ranking engine that sits between a raw user search
//! string and a full-text indexed content store.
//!
//! ## Features
//!
//! - Query normalization (Unicode NFC, case folding, stopwords, stemming)
//! - Dictionary-driven advisory spelling correction
//! - Synonym-based recall expansion
//! - Title-priority ranked retrieval for text and image search
//! - Media deduplication and format-priority ordering
//! - Per-user click-based re-ranking
//! - TTL-based result caching
//!
//! The full-text index itself is an external collaborator, consumed through
//! the [`index::SearchIndex`] trait.

pub mod analysis;
pub mod cache;
pub mod error;
pub mod index;
pub mod personalization;
pub mod query;
pub mod results;
pub mod service;
pub mod spelling;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
