//! In-memory click/search tracking and result re-ranking.
//!
//! The tracker is an explicit context object owned by the service, never a
//! process-global, so tests get isolated instances while a deployed process
//! keeps one logical instance. Nothing here survives a restart.

use std::collections::VecDeque;

use ahash::AHashMap;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::results::RankedResult;

/// Default bound on the search-history ring buffer.
pub const DEFAULT_MAX_HISTORY: usize = 1000;

/// Default bound on the click-counter key space.
pub const DEFAULT_MAX_TRACKED_URLS: usize = 50_000;

/// Keyword -> interest-category table. A single query may increment several
/// categories.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("music", &["music", "song", "singer"]),
    ("movies", &["movie", "film", "actor"]),
    ("books", &["book", "author", "novel"]),
    ("technology", &["tech", "software", "computer"]),
];

/// A recorded search query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRecord {
    /// Lowercased query text.
    pub query: String,
    pub timestamp: DateTime<Utc>,
}

/// Per-process click and search tracking.
#[derive(Debug)]
pub struct PersonalizationTracker {
    clicks: Mutex<AHashMap<String, u64>>,
    history: Mutex<VecDeque<SearchRecord>>,
    max_history: usize,
    max_tracked_urls: usize,
}

impl Default for PersonalizationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonalizationTracker {
    /// Create a tracker with the default bounds.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_HISTORY, DEFAULT_MAX_TRACKED_URLS)
    }

    /// Create a tracker with explicit history and click-map bounds.
    pub fn with_limits(max_history: usize, max_tracked_urls: usize) -> Self {
        PersonalizationTracker {
            clicks: Mutex::new(AHashMap::new()),
            history: Mutex::new(VecDeque::with_capacity(max_history.min(1024))),
            max_history,
            max_tracked_urls,
        }
    }

    /// Record a click on a search result.
    ///
    /// The key space is bounded: inserting a brand-new URL into a full map
    /// first evicts the entry with the lowest count.
    pub fn record_click(&self, url: &str) {
        let mut clicks = self.clicks.lock();

        if !clicks.contains_key(url) && clicks.len() >= self.max_tracked_urls {
            if let Some(coldest) = clicks
                .iter()
                .min_by_key(|(_, count)| **count)
                .map(|(key, _)| key.clone())
            {
                clicks.remove(&coldest);
            }
        }

        *clicks.entry(url.to_string()).or_insert(0) += 1;
    }

    /// Record a search query, evicting the oldest entry on overflow.
    pub fn record_search(&self, query: &str) {
        let mut history = self.history.lock();
        history.push_back(SearchRecord {
            query: query.to_lowercase(),
            timestamp: Utc::now(),
        });
        while history.len() > self.max_history {
            history.pop_front();
        }
    }

    /// Personalization score for a URL: its click count, or 0.
    pub fn score(&self, url: &str) -> u64 {
        self.clicks.lock().get(url).copied().unwrap_or(0)
    }

    /// Re-rank results by descending personalization score. The sort is
    /// stable: equal scores preserve the incoming order. Scores are set on
    /// the returned results.
    pub fn personalize(&self, mut results: Vec<RankedResult>) -> Vec<RankedResult> {
        {
            let clicks = self.clicks.lock();
            for result in &mut results {
                result.personalization_score = clicks.get(&result.url).copied().unwrap_or(0);
            }
        }

        results.sort_by(|a, b| b.personalization_score.cmp(&a.personalization_score));
        results
    }

    /// Interest categories inferred from search history.
    pub fn interest_categories(&self) -> AHashMap<String, u64> {
        let history = self.history.lock();
        let mut categories = AHashMap::new();

        for record in history.iter() {
            for (category, keywords) in CATEGORY_KEYWORDS {
                if keywords.iter().any(|kw| record.query.contains(kw)) {
                    *categories.entry((*category).to_string()).or_insert(0) += 1;
                }
            }
        }

        categories
    }

    /// Privacy feature: drop history entries older than `days_old` days.
    pub fn clear_old_history(&self, days_old: i64) {
        let cutoff = Utc::now() - Duration::days(days_old);
        self.history
            .lock()
            .retain(|record| record.timestamp > cutoff);
    }

    /// Number of retained history entries.
    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }

    /// Number of URLs with click counters.
    pub fn tracked_urls(&self) -> usize {
        self.clicks.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(url: &str) -> RankedResult {
        RankedResult {
            title: url.to_string(),
            url: url.to_string(),
            description: None,
            content: None,
            favicon: None,
            media: Vec::new(),
            title_priority: 5,
            title_length: url.len(),
            rank: 0,
            personalization_score: 0,
        }
    }

    #[test]
    fn test_click_scores_are_monotonic() {
        let tracker = PersonalizationTracker::new();
        assert_eq!(tracker.score("https://x/a"), 0);

        let mut previous = 0;
        for _ in 0..5 {
            tracker.record_click("https://x/a");
            let score = tracker.score("https://x/a");
            assert!(score >= previous);
            previous = score;
        }
        assert_eq!(previous, 5);
    }

    #[test]
    fn test_personalize_stable_descending() {
        let tracker = PersonalizationTracker::new();
        tracker.record_click("https://x/b");
        tracker.record_click("https://x/b");
        tracker.record_click("https://x/c");

        let results = vec![result("https://x/a"), result("https://x/c"), result("https://x/b")];
        let ranked = tracker.personalize(results);

        let urls: Vec<&str> = ranked.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://x/b", "https://x/c", "https://x/a"]);
        assert_eq!(ranked[0].personalization_score, 2);
    }

    #[test]
    fn test_personalize_ties_keep_incoming_order() {
        let tracker = PersonalizationTracker::new();
        let results = vec![result("https://x/a"), result("https://x/b"), result("https://x/c")];
        let ranked = tracker.personalize(results);

        let urls: Vec<&str> = ranked.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://x/a", "https://x/b", "https://x/c"]);
    }

    #[test]
    fn test_history_is_bounded_fifo() {
        let tracker = PersonalizationTracker::with_limits(1000, DEFAULT_MAX_TRACKED_URLS);
        for i in 0..1001 {
            tracker.record_search(&format!("query {i}"));
        }

        assert_eq!(tracker.history_len(), 1000);
        // The oldest entry was evicted.
        let history = tracker.history.lock();
        assert_eq!(history.front().unwrap().query, "query 1");
        assert_eq!(history.back().unwrap().query, "query 1000");
    }

    #[test]
    fn test_click_map_bounded_evicts_coldest() {
        let tracker = PersonalizationTracker::with_limits(10, 2);
        tracker.record_click("https://x/hot");
        tracker.record_click("https://x/hot");
        tracker.record_click("https://x/cold");

        // Map full: inserting a new URL evicts the coldest one.
        tracker.record_click("https://x/new");
        assert_eq!(tracker.tracked_urls(), 2);
        assert_eq!(tracker.score("https://x/hot"), 2);
        assert_eq!(tracker.score("https://x/cold"), 0);
        assert_eq!(tracker.score("https://x/new"), 1);
    }

    #[test]
    fn test_interest_categories() {
        let tracker = PersonalizationTracker::new();
        tracker.record_search("best movie soundtrack music");
        tracker.record_search("rust software");
        tracker.record_search("paris");

        let categories = tracker.interest_categories();
        // One query may increment several categories.
        assert_eq!(categories.get("music").copied(), Some(1));
        assert_eq!(categories.get("movies").copied(), Some(1));
        assert_eq!(categories.get("technology").copied(), Some(1));
        assert_eq!(categories.get("books"), None);
    }

    #[test]
    fn test_clear_old_history_keeps_recent() {
        let tracker = PersonalizationTracker::new();
        tracker.record_search("recent query");
        tracker.clear_old_history(30);

        assert_eq!(tracker.history_len(), 1);

        tracker.clear_old_history(0);
        assert_eq!(tracker.history_len(), 0);
    }
}
