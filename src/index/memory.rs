//! In-memory [`SearchIndex`] implementation.
//!
//! Useful for tests and for embedding the engine without an external
//! full-text backend. Relevance is the number of predicate terms that occur
//! in a page's title or content; ties keep insertion order.

use parking_lot::RwLock;

use crate::error::Result;
use crate::index::{IndexPredicate, MEDIA_DELIMITER, PageHit, PageRecord, PageSample, SearchIndex};

/// A page staged for insertion into a [`MemoryIndex`].
#[derive(Debug, Clone, Default)]
pub struct PageDraft {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub favicon: Option<String>,
    pub media: Vec<String>,
}

#[derive(Debug, Clone)]
struct StoredPage {
    record: PageRecord,
    media: Vec<String>,
}

impl StoredPage {
    /// Count how many predicate terms occur in the title or content.
    fn relevance(&self, predicate: &IndexPredicate) -> usize {
        let title = self.record.title.to_lowercase();
        let content = self
            .record
            .content
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        predicate
            .terms()
            .iter()
            .filter(|term| {
                let term = term.to_lowercase();
                title.contains(&term) || content.contains(&term)
            })
            .count()
    }
}

/// An in-memory full-text index.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    pages: RwLock<Vec<StoredPage>>,
}

impl MemoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        MemoryIndex {
            pages: RwLock::new(Vec::new()),
        }
    }

    /// Insert a page and return its assigned id.
    pub fn add_page(&self, draft: PageDraft) -> u64 {
        let mut pages = self.pages.write();
        let id = pages.len() as u64 + 1;
        pages.push(StoredPage {
            record: PageRecord {
                id,
                title: draft.title,
                url: draft.url,
                description: draft.description,
                content: draft.content,
                favicon: draft.favicon,
            },
            media: draft.media,
        });
        id
    }

    /// Number of indexed pages.
    pub fn len(&self) -> usize {
        self.pages.read().len()
    }

    /// Check if the index holds no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.read().is_empty()
    }
}

impl SearchIndex for MemoryIndex {
    fn lookup_title(&self, query: &str) -> Result<Option<PageRecord>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(None);
        }

        let pages = self.pages.read();
        let suffix_prefix = format!("{query} - ");

        let mut exact = None;
        let mut suffixed = None;
        let mut substring = None;

        for page in pages.iter() {
            let title = page.record.title.trim().to_lowercase();
            if exact.is_none() && title == query {
                exact = Some(page);
            } else if suffixed.is_none() && title.starts_with(&suffix_prefix) {
                suffixed = Some(page);
            } else if substring.is_none() && title.contains(&query) {
                substring = Some(page);
            }
        }

        Ok(exact
            .or(suffixed)
            .or(substring)
            .map(|page| page.record.clone()))
    }

    fn search(&self, predicate: &IndexPredicate, limit: usize) -> Result<Vec<PageHit>> {
        if predicate.is_empty() {
            return Ok(Vec::new());
        }

        let pages = self.pages.read();
        let mut scored: Vec<(usize, &StoredPage)> = pages
            .iter()
            .map(|page| (page.relevance(predicate), page))
            .filter(|(score, _)| *score > 0)
            .collect();

        // Stable: equal scores keep insertion order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, page)| PageHit {
                page: page.record.clone(),
                media: if page.media.is_empty() {
                    None
                } else {
                    Some(page.media.join(MEDIA_DELIMITER))
                },
            })
            .collect())
    }

    fn sample_pages(&self, limit: usize) -> Result<Vec<PageSample>> {
        Ok(self
            .pages
            .read()
            .iter()
            .take(limit)
            .map(|page| PageSample {
                title: Some(page.record.title.clone()),
                description: page.record.description.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> MemoryIndex {
        let index = MemoryIndex::new();
        index.add_page(PageDraft {
            title: "Paris".to_string(),
            url: "https://example.com/paris".to_string(),
            content: Some("The capital of France.".to_string()),
            ..PageDraft::default()
        });
        index.add_page(PageDraft {
            title: "Paris - Wikipedia".to_string(),
            url: "https://en.wikipedia.org/wiki/Paris".to_string(),
            media: vec!["https://example.com/paris.jpg".to_string()],
            ..PageDraft::default()
        });
        index.add_page(PageDraft {
            title: "Tokyo".to_string(),
            url: "https://example.com/tokyo".to_string(),
            content: Some("Capital of Japan, far from Paris.".to_string()),
            ..PageDraft::default()
        });
        index
    }

    #[test]
    fn test_lookup_title_precedence() {
        let index = populated();

        let page = index.lookup_title("paris").unwrap().unwrap();
        assert_eq!(page.title, "Paris");

        let page = index.lookup_title("  PARIS  ").unwrap().unwrap();
        assert_eq!(page.title, "Paris");

        let page = index.lookup_title("tok").unwrap().unwrap();
        assert_eq!(page.title, "Tokyo");

        assert!(index.lookup_title("berlin").unwrap().is_none());
    }

    #[test]
    fn test_search_scores_by_term_overlap() {
        let index = populated();
        let predicate = IndexPredicate::new(vec!["paris".to_string(), "capital".to_string()]);

        let hits = index.search(&predicate, 10).unwrap();
        assert_eq!(hits.len(), 3);
        // Both terms occur in the first and third pages; the first wins by
        // insertion order.
        assert_eq!(hits[0].page.title, "Paris");
        assert_eq!(hits[1].page.title, "Tokyo");
    }

    #[test]
    fn test_search_joins_media() {
        let index = populated();
        let predicate = IndexPredicate::new(vec!["wikipedia".to_string()]);

        let hits = index.search(&predicate, 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(
            hits[0].media.as_deref(),
            Some("https://example.com/paris.jpg")
        );
    }

    #[test]
    fn test_search_respects_limit() {
        let index = populated();
        let predicate = IndexPredicate::new(vec!["paris".to_string()]);

        let hits = index.search(&predicate, 1).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_sample_pages() {
        let index = populated();
        let samples = index.sample_pages(2).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].title.as_deref(), Some("Paris"));
    }
}
