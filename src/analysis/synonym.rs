//! Synonym expansion for query tokens.
//!
//! Expansion is additive (originals are never removed) and idempotent:
//! expanding an already-expanded set is a no-op. Symmetric closure of the
//! table is a data-entry convention, not enforced here.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, SagittaError};

/// Built-in synonym table. Each entry maps a token to the tokens that are
/// added alongside it.
const DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    ("pic", &["picture", "image", "photo"]),
    ("picture", &["pic", "image", "photo"]),
    ("photo", &["picture", "image", "pic"]),
    ("movie", &["film", "cinema"]),
    ("film", &["movie", "cinema"]),
    ("song", &["music", "track"]),
    ("music", &["song", "track"]),
    ("artist", &["musician", "singer"]),
    ("musician", &["artist", "singer"]),
    ("singer", &["artist", "musician"]),
    ("actor", &["actress", "performer"]),
    ("actress", &["actor", "performer"]),
    ("book", &["novel", "publication"]),
    ("novel", &["book", "publication"]),
];

/// Static token -> token-set expander used to widen recall before the index
/// predicate is built.
#[derive(Debug, Clone)]
pub struct SynonymExpander {
    table: HashMap<String, Vec<String>>,
}

impl Default for SynonymExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl SynonymExpander {
    /// Create an expander with the built-in table.
    pub fn new() -> Self {
        let table = DEFAULT_SYNONYMS
            .iter()
            .map(|(term, synonyms)| {
                (
                    (*term).to_string(),
                    synonyms.iter().map(|s| (*s).to_string()).collect(),
                )
            })
            .collect();

        SynonymExpander { table }
    }

    /// Create an expander from an explicit token -> synonyms table.
    pub fn with_table(table: HashMap<String, Vec<String>>) -> Self {
        SynonymExpander { table }
    }

    /// Build an expander from synonym groups, mapping every member of a
    /// group to all of the others.
    pub fn from_groups(groups: Vec<Vec<String>>) -> Self {
        let mut table: HashMap<String, Vec<String>> = HashMap::new();

        for group in groups {
            for (i, term) in group.iter().enumerate() {
                let synonyms: Vec<String> = group
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, other)| other.clone())
                    .collect();
                table.entry(term.clone()).or_default().extend(synonyms);
            }
        }

        SynonymExpander { table }
    }

    /// Load synonym groups from a JSON file.
    ///
    /// Expected format, one array per group of mutually equivalent terms:
    /// ```json
    /// [
    ///   ["pic", "picture", "photo"],
    ///   ["movie", "film"]
    /// ]
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            SagittaError::analysis(format!(
                "failed to read synonym file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let groups: Vec<Vec<String>> = serde_json::from_str(&content)?;

        Ok(Self::from_groups(groups))
    }

    /// Get the synonyms mapped to a token, if any.
    pub fn synonyms(&self, token: &str) -> Option<&[String]> {
        self.table.get(token).map(|v| v.as_slice())
    }

    /// Expand a token set with synonyms, preserving the original order and
    /// appending any new synonyms afterward.
    pub fn expand(&self, tokens: &[String]) -> Vec<String> {
        let mut expanded: Vec<String> = tokens.to_vec();

        for token in tokens {
            if let Some(synonyms) = self.table.get(token) {
                for synonym in synonyms {
                    if !expanded.contains(synonym) {
                        expanded.push(synonym.clone());
                    }
                }
            }
        }

        expanded
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_expand_adds_synonyms() {
        let expander = SynonymExpander::new();
        let expanded = expander.expand(&tokens(&["pic"]));

        assert_eq!(expanded, tokens(&["pic", "picture", "image", "photo"]));
    }

    #[test]
    fn test_expand_keeps_unknown_tokens() {
        let expander = SynonymExpander::new();
        let expanded = expander.expand(&tokens(&["paris"]));

        assert_eq!(expanded, tokens(&["paris"]));
    }

    #[test]
    fn test_expand_is_idempotent() {
        let expander = SynonymExpander::new();
        let once = expander.expand(&tokens(&["pic", "movie", "cat"]));
        let twice = expander.expand(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_from_groups_is_bidirectional() {
        let expander = SynonymExpander::from_groups(vec![tokens(&["big", "large", "huge"])]);

        let expanded = expander.expand(&tokens(&["large"]));
        assert!(expanded.contains(&"big".to_string()));
        assert!(expanded.contains(&"huge".to_string()));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[["pic", "picture", "photo"]]"#).unwrap();

        let expander = SynonymExpander::load_from_file(file.path()).unwrap();
        let expanded = expander.expand(&tokens(&["photo"]));

        assert!(expanded.contains(&"pic".to_string()));
        assert!(expanded.contains(&"picture".to_string()));
    }
}
