//! Response envelopes.
//!
//! Every operation returns one consistent envelope; callers never have to
//! shape-sniff between a bare array and a wrapped object.

use serde::{Deserialize, Serialize};

use crate::results::{MediaResult, RankedResult};

/// Single best-matching document surfaced as an infobox above ranked
/// results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeCard {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
}

/// Pre-personalization text-search shape; this is what the cache stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSearchBase {
    pub knowledge_card: Option<KnowledgeCard>,
    pub results: Vec<RankedResult>,
}

/// Response of a text search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_card: Option<KnowledgeCard>,
    pub results: Vec<RankedResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Response of an image search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSearchResponse {
    pub results: Vec<MediaResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Point-in-time counters exposed for observability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub history_len: usize,
    pub tracked_urls: usize,
    pub cached_text_queries: usize,
    pub cached_image_queries: usize,
    pub vocabulary_words: usize,
}
