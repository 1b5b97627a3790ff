//! Text analysis module for Sagitta.
//!
//! This module provides query-side analysis: Unicode normalization and
//! tokenization, stopword removal, stemming, and synonym expansion.

pub mod normalizer;
pub mod stemmer;
pub mod stopwords;
pub mod synonym;

// Re-export commonly used types
pub use normalizer::*;
pub use stemmer::*;
pub use stopwords::*;
pub use synonym::*;
