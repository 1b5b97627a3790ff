//! Per-user personalization: click counters, bounded search history,
//! interest categories, and click-based re-ranking.

pub mod tracker;

pub use tracker::*;
