//! Correction vocabulary built from indexed titles and descriptions.
//!
//! The vocabulary is published through a shared handle by a background task
//! so that request handling never blocks on its construction. Until the
//! first successful build the corrector sees an empty vocabulary and reports
//! no suggestion.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use unicode_segmentation::UnicodeSegmentation;

use crate::index::{PageSample, SearchIndex};

/// A set of known-good words sampled from the index.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: HashSet<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Vocabulary {
            words: HashSet::new(),
        }
    }

    /// Build a vocabulary from sampled title/description pairs.
    pub fn from_samples(samples: &[PageSample]) -> Self {
        let mut vocabulary = Vocabulary::new();
        for sample in samples {
            if let Some(title) = &sample.title {
                vocabulary.add_text(title);
            }
            if let Some(description) = &sample.description {
                vocabulary.add_text(description);
            }
        }
        vocabulary
    }

    /// Tokenize a text fragment (UAX #29 word boundaries) and add every word
    /// longer than two characters.
    pub fn add_text(&mut self, text: &str) {
        for word in text.unicode_words() {
            if word.chars().count() > 2 {
                self.words.insert(word.to_lowercase());
            }
        }
    }

    /// Check whether a word is in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Iterate over the vocabulary words.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_str())
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Shared, swappable vocabulary handle.
pub type SharedVocabulary = Arc<RwLock<Vocabulary>>;

/// Background vocabulary construction task.
///
/// Samples a bounded number of pages from the index and publishes the built
/// vocabulary through the shared handle. An empty or unreadable sample is
/// retried on a fixed delay instead of giving up permanently. The task is
/// aborted when the builder is dropped.
#[derive(Debug)]
pub struct VocabularyBuilder {
    handle: tokio::task::JoinHandle<()>,
}

impl VocabularyBuilder {
    /// Spawn the build task. Exactly one instance should exist per service.
    pub fn spawn(
        index: Arc<dyn SearchIndex>,
        vocabulary: SharedVocabulary,
        sample_limit: usize,
        retry_delay: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                match index.sample_pages(sample_limit) {
                    Ok(samples) if !samples.is_empty() => {
                        let built = Vocabulary::from_samples(&samples);
                        tracing::info!(words = built.len(), "vocabulary built from index sample");
                        *vocabulary.write() = built;
                        return;
                    }
                    Ok(_) => {
                        tracing::warn!(
                            retry_secs = retry_delay.as_secs(),
                            "index sample empty, retrying vocabulary build"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            retry_secs = retry_delay.as_secs(),
                            "vocabulary build failed, retrying"
                        );
                    }
                }
                tokio::time::sleep(retry_delay).await;
            }
        });

        VocabularyBuilder { handle }
    }

    /// Whether the build task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for VocabularyBuilder {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
