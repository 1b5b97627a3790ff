//! Fixed stopword set shared by the normalizer and the spelling corrector.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Default English stop words list.
///
/// Common English words that are filtered out of queries because they
/// carry no retrieval signal.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "and", "or", "but", "in", "with", "to", "for",
    "of", "as", "by", "from", "that", "this", "it", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "do", "does", "did", "will", "would", "should", "could", "can", "may",
    "might", "must", "shall",
];

/// Default stop words as a HashSet.
pub static DEFAULT_STOP_WORDS_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DEFAULT_STOP_WORDS.iter().copied().collect());

/// Check if a word is in the default stop word set.
///
/// The check is exact; callers are expected to lowercase first.
pub fn is_stop_word(word: &str) -> bool {
    DEFAULT_STOP_WORDS_SET.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_word_membership() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("which"));
        assert!(!is_stop_word("paris"));
        // Lookup is case-sensitive; callers lowercase first.
        assert!(!is_stop_word("The"));
    }
}
