//! Query normalization: Unicode canonicalization, case folding, tokenization,
//! stopword removal, and stemming.
//!
//! # Examples
//!
//! ```
//! use sagitta::analysis::normalizer::TokenNormalizer;
//!
//! let normalizer = TokenNormalizer::new();
//! let tokens = normalizer.normalize("The Running Shoes");
//!
//! // Surviving tokens first, then their stems, deduplicated.
//! assert_eq!(tokens, vec!["running", "shoes", "run", "shoe"]);
//! ```

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

use crate::analysis::stemmer::PorterStemmer;
use crate::analysis::stopwords::is_stop_word;

/// Normalizes a raw query into a deduplicated token set.
///
/// Steps, in order: NFC normalization, lowercase folding, tokenization on
/// alphanumeric runs, dropping tokens of length <= 1, dropping stopwords,
/// and adding the stem of every surviving token. The result has set
/// semantics but preserves a deterministic order (tokens first, stems
/// appended) so that downstream predicates are stable.
#[derive(Debug, Clone, Default)]
pub struct TokenNormalizer {
    stemmer: PorterStemmer,
}

impl TokenNormalizer {
    /// Create a new token normalizer.
    pub fn new() -> Self {
        TokenNormalizer {
            stemmer: PorterStemmer::new(),
        }
    }

    /// Normalize a raw query into the union of surviving tokens and stems.
    ///
    /// Empty or whitespace-only input yields an empty set, which callers use
    /// to short-circuit without touching the index.
    pub fn normalize(&self, query: &str) -> Vec<String> {
        let folded: String = query.nfc().collect::<String>().to_lowercase();

        let tokens: Vec<String> = folded
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() > 1)
            .filter(|token| !is_stop_word(token))
            .map(|token| token.to_string())
            .collect();

        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for token in &tokens {
            if seen.insert(token.clone()) {
                result.push(token.clone());
            }
        }
        for token in &tokens {
            let stem = self.stemmer.stem(token);
            if seen.insert(stem.clone()) {
                result.push(stem);
            }
        }

        result
    }
}
