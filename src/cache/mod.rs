//! TTL-based cache of pre-personalization search responses.
//!
//! One cache exists per operation kind, keyed by the lowercase-trimmed raw
//! query. Cached values are the base response shape from before
//! personalization, so click-based re-ranking is always applied fresh, even
//! on cache hits. Expiry is lazy on reads plus a periodic sweep piggybacked
//! on cache access.

use std::time::{Duration, Instant};

use ahash::AHashMap;
use parking_lot::Mutex;

/// Default entry time-to-live.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default interval between full expiry sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// A TTL cache. Reads never return a value past its TTL; writes are
/// last-write-wins per key.
#[derive(Debug)]
pub struct ResultCache<V: Clone> {
    entries: Mutex<AHashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    sweep_interval: Duration,
    last_sweep: Mutex<Instant>,
}

impl<V: Clone> Default for ResultCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_SWEEP_INTERVAL)
    }
}

impl<V: Clone> ResultCache<V> {
    /// Create a cache with the given TTL and sweep interval.
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        ResultCache {
            entries: Mutex::new(AHashMap::new()),
            ttl,
            sweep_interval,
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// Normalize a raw query into a cache key.
    pub fn key_for(query: &str) -> String {
        query.trim().to_lowercase()
    }

    /// Get a live value. An expired entry is removed and reported as a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        self.maybe_sweep();

        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert or overwrite a value.
    pub fn insert(&self, key: String, value: V) {
        self.maybe_sweep();

        self.entries.lock().insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Number of entries, including any not yet swept.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Purge expired entries when the sweep interval has elapsed.
    fn maybe_sweep(&self) {
        let mut last_sweep = self.last_sweep.lock();
        if last_sweep.elapsed() < self.sweep_interval {
            return;
        }
        *last_sweep = Instant::now();
        drop(last_sweep);

        let ttl = self.ttl;
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, "cache sweep removed expired entries");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_get_within_ttl() {
        let cache: ResultCache<String> = ResultCache::default();
        cache.insert("cats".to_string(), "value".to_string());

        assert_eq!(cache.get("cats"), Some("value".to_string()));
        assert_eq!(cache.get("dogs"), None);
    }

    #[test]
    fn test_expired_entry_is_never_returned() {
        let cache: ResultCache<u32> =
            ResultCache::new(Duration::from_millis(20), DEFAULT_SWEEP_INTERVAL);
        cache.insert("cats".to_string(), 7);

        sleep(Duration::from_millis(30));
        assert_eq!(cache.get("cats"), None);
        // Lazy removal dropped the entry.
        assert!(cache.is_empty());
    }

    #[test]
    fn test_key_normalization() {
        assert_eq!(ResultCache::<u32>::key_for("  CaTs  "), "cats");
    }

    #[test]
    fn test_last_write_wins() {
        let cache: ResultCache<u32> = ResultCache::default();
        cache.insert("cats".to_string(), 1);
        cache.insert("cats".to_string(), 2);

        assert_eq!(cache.get("cats"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_sweep_purges_only_expired() {
        let cache: ResultCache<u32> =
            ResultCache::new(Duration::from_millis(20), Duration::from_millis(10));
        cache.insert("old".to_string(), 1);
        sleep(Duration::from_millis(30));
        cache.insert("fresh".to_string(), 2);

        // The insert above crossed the sweep interval and purged "old".
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("fresh"), Some(2));
    }
}
