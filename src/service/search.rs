//! The search service: orchestrates normalization, correction, expansion,
//! planning, retrieval, assembly, personalization, and caching.

use std::sync::Arc;
use std::time::Duration;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::analysis::normalizer::TokenNormalizer;
use crate::analysis::synonym::SynonymExpander;
use crate::cache::ResultCache;
use crate::error::Result;
use crate::index::SearchIndex;
use crate::personalization::PersonalizationTracker;
use crate::query::{QueryPlanner, SearchKind};
use crate::results::{MediaResult, ResultAssembler, extract_description};
use crate::service::config::SearchConfig;
use crate::service::types::{
    ImageSearchResponse, KnowledgeCard, ServiceStats, TextSearchBase, TextSearchResponse,
};
use crate::spelling::corrector::SpellingCorrector;
use crate::spelling::vocabulary::{SharedVocabulary, Vocabulary, VocabularyBuilder};

/// Query-processing and ranking engine over an external full-text index.
///
/// Construction spawns the background vocabulary build and therefore
/// requires a running tokio runtime. All shared state (caches, click and
/// history maps, vocabulary) lives inside the service; dropping it cancels
/// the background task and discards every in-memory artifact.
pub struct SearchService {
    index: Arc<dyn SearchIndex>,
    config: SearchConfig,
    normalizer: TokenNormalizer,
    expander: SynonymExpander,
    planner: QueryPlanner,
    assembler: ResultAssembler,
    corrector: SpellingCorrector,
    tracker: PersonalizationTracker,
    vocabulary: SharedVocabulary,
    text_cache: ResultCache<TextSearchBase>,
    image_cache: ResultCache<Vec<MediaResult>>,
    _vocabulary_builder: VocabularyBuilder,
}

impl SearchService {
    /// Create a service with the default configuration and synonym table.
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        Self::with_config(index, SearchConfig::default())
    }

    /// Create a service with a custom configuration.
    pub fn with_config(index: Arc<dyn SearchIndex>, config: SearchConfig) -> Self {
        Self::with_expander(index, config, SynonymExpander::new())
    }

    /// Create a service with a custom configuration and synonym table.
    pub fn with_expander(
        index: Arc<dyn SearchIndex>,
        config: SearchConfig,
        expander: SynonymExpander,
    ) -> Self {
        let vocabulary: SharedVocabulary = Arc::new(RwLock::new(Vocabulary::new()));
        let vocabulary_builder = VocabularyBuilder::spawn(
            Arc::clone(&index),
            Arc::clone(&vocabulary),
            config.vocabulary_sample_limit,
            Duration::from_secs(config.vocabulary_retry_secs),
        );

        let ttl = Duration::from_secs(config.cache_ttl_secs);
        let sweep = Duration::from_secs(config.cache_sweep_secs);

        SearchService {
            normalizer: TokenNormalizer::new(),
            expander,
            planner: QueryPlanner::new(
                config.text_result_cap,
                config.image_result_cap,
                config.fetch_factor,
            ),
            assembler: ResultAssembler::new(config.media_per_result),
            corrector: SpellingCorrector::with_threshold(
                Arc::clone(&vocabulary),
                config.correction_threshold,
            ),
            tracker: PersonalizationTracker::with_limits(
                config.max_history,
                config.max_tracked_urls,
            ),
            vocabulary,
            text_cache: ResultCache::new(ttl, sweep),
            image_cache: ResultCache::new(ttl, sweep),
            index,
            config,
            _vocabulary_builder: vocabulary_builder,
        }
    }

    /// Execute a text search.
    ///
    /// An empty or whitespace-only query returns an empty response with no
    /// side effects. Index failures surface as
    /// [`SagittaError::Index`](crate::error::SagittaError::Index) with no
    /// partial results.
    pub async fn text_search(&self, query: &str, personalize: bool) -> Result<TextSearchResponse> {
        if query.trim().is_empty() {
            return Ok(TextSearchResponse::default());
        }

        let suggestion = self.corrector.correct(query);
        self.tracker.record_search(query);

        let cache_key = ResultCache::<TextSearchBase>::key_for(query);
        if let Some(base) = self.text_cache.get(&cache_key) {
            tracing::debug!(query = %cache_key, "text cache hit");
            let results = if personalize {
                self.tracker.personalize(base.results)
            } else {
                base.results
            };
            return Ok(TextSearchResponse {
                knowledge_card: base.knowledge_card,
                results,
                suggestion,
            });
        }

        let tokens = self.normalizer.normalize(query);
        if tokens.is_empty() {
            return Ok(TextSearchResponse {
                knowledge_card: None,
                results: Vec::new(),
                suggestion,
            });
        }
        let expanded = self.expander.expand(&tokens);

        let knowledge_card = self.knowledge_card(query)?;

        let plan = self.planner.plan(SearchKind::Text, query, expanded);
        let hits = self.index.search(&plan.predicate, plan.fetch_limit)?;
        let results = self.assembler.assemble_text(hits, &plan);

        let base = TextSearchBase {
            knowledge_card,
            results,
        };
        self.text_cache.insert(cache_key, base.clone());

        let results = if personalize {
            self.tracker.personalize(base.results)
        } else {
            base.results
        };

        Ok(TextSearchResponse {
            knowledge_card: base.knowledge_card,
            results,
            suggestion,
        })
    }

    /// Execute an image search.
    ///
    /// Identical to text search up through token expansion, then the flat
    /// image shape. No personalization is applied to image results.
    pub async fn image_search(&self, query: &str) -> Result<ImageSearchResponse> {
        if query.trim().is_empty() {
            return Ok(ImageSearchResponse::default());
        }

        let suggestion = self.corrector.correct(query);
        self.tracker.record_search(query);

        let cache_key = ResultCache::<Vec<MediaResult>>::key_for(query);
        if let Some(results) = self.image_cache.get(&cache_key) {
            tracing::debug!(query = %cache_key, "image cache hit");
            return Ok(ImageSearchResponse {
                results,
                suggestion,
            });
        }

        let tokens = self.normalizer.normalize(query);
        if tokens.is_empty() {
            return Ok(ImageSearchResponse {
                results: Vec::new(),
                suggestion,
            });
        }
        let expanded = self.expander.expand(&tokens);

        let plan = self.planner.plan(SearchKind::Image, query, expanded);
        let hits = self.index.search(&plan.predicate, plan.fetch_limit)?;
        let results = self.assembler.assemble_images(hits, &plan);

        self.image_cache.insert(cache_key, results.clone());

        Ok(ImageSearchResponse {
            results,
            suggestion,
        })
    }

    /// Record a click on a result URL for personalization.
    pub fn record_click(&self, url: &str) {
        self.tracker.record_click(url);
    }

    /// Interest categories inferred from the search history.
    pub fn interest_categories(&self) -> AHashMap<String, u64> {
        self.tracker.interest_categories()
    }

    /// Privacy feature: drop history entries older than `days_old` days.
    pub fn clear_old_history(&self, days_old: i64) {
        self.tracker.clear_old_history(days_old);
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Point-in-time counters for observability.
    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            history_len: self.tracker.history_len(),
            tracked_urls: self.tracker.tracked_urls(),
            cached_text_queries: self.text_cache.len(),
            cached_image_queries: self.image_cache.len(),
            vocabulary_words: self.vocabulary.read().len(),
        }
    }

    /// Look up the best title match and derive a description when the page
    /// has none.
    fn knowledge_card(&self, query: &str) -> Result<Option<KnowledgeCard>> {
        let Some(page) = self.index.lookup_title(query)? else {
            return Ok(None);
        };

        let description = page
            .description
            .filter(|d| !d.trim().is_empty())
            .or_else(|| page.content.as_deref().and_then(extract_description));

        Ok(Some(KnowledgeCard {
            title: page.title,
            url: page.url,
            description,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SagittaError;
    use crate::index::{IndexPredicate, MemoryIndex, PageDraft, PageHit, PageRecord, PageSample};

    /// Index stub whose every operation fails.
    struct BrokenIndex;

    impl SearchIndex for BrokenIndex {
        fn lookup_title(&self, _query: &str) -> Result<Option<PageRecord>> {
            Err(SagittaError::index("backend unreachable"))
        }

        fn search(&self, _predicate: &IndexPredicate, _limit: usize) -> Result<Vec<PageHit>> {
            Err(SagittaError::index("backend unreachable"))
        }

        fn sample_pages(&self, _limit: usize) -> Result<Vec<PageSample>> {
            Err(SagittaError::index("backend unreachable"))
        }
    }

    fn populated_index() -> Arc<MemoryIndex> {
        let index = Arc::new(MemoryIndex::new());
        index.add_page(PageDraft {
            title: "Paris".to_string(),
            url: "https://example.com/paris".to_string(),
            content: Some(
                "Paris is the capital and most populous city of France.".to_string(),
            ),
            media: vec![
                "https://example.com/paris.png".to_string(),
                "https://example.com/paris.jpg".to_string(),
            ],
            ..PageDraft::default()
        });
        index.add_page(PageDraft {
            title: "Paris - Wikipedia".to_string(),
            url: "https://en.wikipedia.org/wiki/Paris".to_string(),
            description: Some("Capital of France".to_string()),
            content: Some("Paris article text.".to_string()),
            ..PageDraft::default()
        });
        index
    }

    #[tokio::test]
    async fn test_empty_query_has_no_side_effects() {
        let service = SearchService::new(populated_index());

        let response = service.text_search("   ", true).await.unwrap();
        assert!(response.results.is_empty());
        assert!(response.knowledge_card.is_none());
        assert!(response.suggestion.is_none());

        let stats = service.stats();
        assert_eq!(stats.history_len, 0);
        assert_eq!(stats.cached_text_queries, 0);
    }

    #[tokio::test]
    async fn test_text_search_returns_knowledge_card_and_results() {
        let service = SearchService::new(populated_index());

        let response = service.text_search("Paris", true).await.unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].title, "Paris");

        let card = response.knowledge_card.unwrap();
        assert_eq!(card.title, "Paris");
        // Derived from content: the page itself has no description.
        assert_eq!(
            card.description.as_deref(),
            Some("Paris is the capital and most populous city of France")
        );
    }

    #[tokio::test]
    async fn test_stopword_only_query_skips_index() {
        let service = SearchService::new(populated_index());

        let response = service.text_search("the of and", true).await.unwrap();
        assert!(response.results.is_empty());
        // The request itself is still recorded.
        assert_eq!(service.stats().history_len, 1);
        assert_eq!(service.stats().cached_text_queries, 0);
    }

    #[tokio::test]
    async fn test_cache_hit_repersonalizes() {
        let service = SearchService::new(populated_index());

        let first = service.text_search("paris", true).await.unwrap();
        assert_eq!(first.results[0].url, "https://example.com/paris");
        assert_eq!(service.stats().cached_text_queries, 1);

        // Click the second result three times; the cached base must be
        // re-ranked at read time.
        for _ in 0..3 {
            service.record_click("https://en.wikipedia.org/wiki/Paris");
        }

        let second = service.text_search("  PARIS ", true).await.unwrap();
        assert_eq!(service.stats().cached_text_queries, 1);
        assert_eq!(second.results[0].url, "https://en.wikipedia.org/wiki/Paris");
        assert_eq!(second.results[0].personalization_score, 3);

        // Personalization disabled: the cached base order is untouched.
        let unpersonalized = service.text_search("paris", false).await.unwrap();
        assert_eq!(unpersonalized.results[0].url, "https://example.com/paris");
    }

    #[tokio::test]
    async fn test_image_search_prefers_jpg() {
        let service = SearchService::new(populated_index());

        let response = service.image_search("paris").await.unwrap();
        let urls: Vec<&str> = response.results.iter().map(|r| r.media_url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/paris.jpg",
                "https://example.com/paris.png",
            ]
        );
    }

    #[tokio::test]
    async fn test_index_failure_is_structured() {
        let service = SearchService::new(Arc::new(BrokenIndex));

        let error = service.text_search("paris", true).await.unwrap_err();
        assert!(matches!(error, SagittaError::Index(_)));

        // The service keeps serving after a failure.
        let response = service.text_search("", true).await.unwrap();
        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn test_interest_categories_accumulate() {
        let service = SearchService::new(populated_index());

        service.text_search("paris movie", true).await.unwrap();
        service.image_search("movie poster").await.unwrap();

        let categories = service.interest_categories();
        assert_eq!(categories.get("movies").copied(), Some(2));
    }
}
