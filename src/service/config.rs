//! Search service configuration.

use serde::{Deserialize, Serialize};

/// Configuration for [`SearchService`](crate::service::SearchService).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum text-search results returned.
    pub text_result_cap: usize,
    /// Maximum image-search results returned.
    pub image_result_cap: usize,
    /// Maximum media URLs kept per text result.
    pub media_per_result: usize,
    /// Over-fetch factor applied to index retrieval before title-priority
    /// re-ranking.
    pub fetch_factor: usize,
    /// Cache entry time-to-live in seconds.
    pub cache_ttl_secs: u64,
    /// Interval between cache expiry sweeps in seconds.
    pub cache_sweep_secs: u64,
    /// Minimum normalized similarity for a spelling correction (0.0 to 1.0).
    pub correction_threshold: f64,
    /// Maximum pages sampled for vocabulary construction.
    pub vocabulary_sample_limit: usize,
    /// Fixed delay between vocabulary build retries, in seconds.
    pub vocabulary_retry_secs: u64,
    /// Search-history ring buffer capacity.
    pub max_history: usize,
    /// Bound on the click-counter key space.
    pub max_tracked_urls: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            text_result_cap: 10,
            image_result_cap: 100,
            media_per_result: 4,
            fetch_factor: 10,
            cache_ttl_secs: 300,
            cache_sweep_secs: 600,
            correction_threshold: 0.4,
            vocabulary_sample_limit: 1000,
            vocabulary_retry_secs: 5,
            max_history: 1000,
            max_tracked_urls: 50_000,
        }
    }
}
