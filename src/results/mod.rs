//! Result assembly: retrieval rows are joined, media deduplicated and
//! ordered, descriptions derived, and rows ranked into their final shape.

pub mod assembler;
pub mod media;

pub use assembler::*;
pub use media::*;

use serde::{Deserialize, Serialize};

/// One ranked text-search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub favicon: Option<String>,
    /// Deduplicated media URLs in priority order, capped per result.
    pub media: Vec<String>,
    /// Title-priority class, 1 (exact) to 5 (full-text only).
    pub title_priority: u8,
    pub title_length: usize,
    /// Position in the index's relevance order.
    pub rank: usize,
    /// Per-URL click count applied at read time; 0 until personalized.
    pub personalization_score: u64,
}

/// One image-search result: a single media URL with its source page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaResult {
    pub media_url: String,
    pub format: MediaFormat,
    pub title: String,
    pub page_url: String,
    pub title_priority: u8,
    pub title_length: usize,
    /// Position of the source page in the index's relevance order.
    pub rank: usize,
}
