//! Dictionary-driven, similarity-threshold spelling correction.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::analysis::stopwords::is_stop_word;
use crate::spelling::similarity::similarity;
use crate::spelling::vocabulary::{SharedVocabulary, Vocabulary};

/// Default minimum normalized similarity for a vocabulary word to be
/// accepted as a correction.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.4;

/// Advisory spelling corrector.
///
/// For each whitespace-delimited word of the lowercased query that is longer
/// than two characters and not a stopword, the closest vocabulary word (by
/// normalized Levenshtein similarity) replaces it, provided the similarity
/// meets the threshold. The corrected query is returned only when at least
/// one word changed; it is never substituted into the retrieval predicate.
#[derive(Debug, Clone)]
pub struct SpellingCorrector {
    vocabulary: SharedVocabulary,
    threshold: f64,
}

impl SpellingCorrector {
    /// Create a corrector over a shared vocabulary with the default threshold.
    pub fn new(vocabulary: SharedVocabulary) -> Self {
        Self::with_threshold(vocabulary, DEFAULT_SIMILARITY_THRESHOLD)
    }

    /// Create a corrector with a custom similarity threshold (0.0 to 1.0).
    pub fn with_threshold(vocabulary: SharedVocabulary, threshold: f64) -> Self {
        SpellingCorrector {
            vocabulary,
            threshold,
        }
    }

    /// Create a corrector over an owned vocabulary (useful in tests).
    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self::new(Arc::new(RwLock::new(vocabulary)))
    }

    /// Suggest a corrected query, or `None` when no word changed.
    ///
    /// An unbuilt (empty) vocabulary always yields `None`.
    pub fn correct(&self, query: &str) -> Option<String> {
        let vocabulary = self.vocabulary.read();
        if vocabulary.is_empty() {
            return None;
        }

        let mut changed = false;
        let corrected: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(|word| {
                if word.chars().count() <= 2 || is_stop_word(word) {
                    return word.to_string();
                }

                match self.best_match(word, &vocabulary) {
                    Some(suggestion) if suggestion != word => {
                        changed = true;
                        suggestion
                    }
                    _ => word.to_string(),
                }
            })
            .collect();

        changed.then(|| corrected.join(" "))
    }

    /// The vocabulary word with the highest similarity at or above the
    /// threshold. Ties are broken by the lexicographically smaller word so
    /// that suggestions are deterministic.
    fn best_match(&self, word: &str, vocabulary: &Vocabulary) -> Option<String> {
        if vocabulary.contains(word) {
            return Some(word.to_string());
        }

        let mut best: Option<(f64, &str)> = None;
        for candidate in vocabulary.words() {
            let score = similarity(word, candidate);
            if score < self.threshold {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_score, best_word)) => {
                    score > best_score || (score == best_score && candidate < best_word)
                }
            };
            if better {
                best = Some((score, candidate));
            }
        }

        best.map(|(_, candidate)| candidate.to_string())
    }
}
