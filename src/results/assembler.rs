//! Joins retrieval rows into ranked results.
//!
//! Text shape: one result per document, media deduplicated and ordered by
//! format priority with token-matching URLs first inside each class, capped
//! per result. Image shape: a flat, globally deduplicated media list with no
//! per-document grouping.

use std::collections::HashSet;

use crate::index::{MEDIA_DELIMITER, PageHit};
use crate::query::{SearchPlan, TitlePriority};
use crate::results::media::MediaFormat;
use crate::results::{MediaResult, RankedResult};

/// Default number of media URLs kept per text result.
pub const DEFAULT_MEDIA_PER_RESULT: usize = 4;

/// Assembles index rows into response-shaped results.
#[derive(Debug, Clone)]
pub struct ResultAssembler {
    media_per_result: usize,
}

impl Default for ResultAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_PER_RESULT)
    }
}

impl ResultAssembler {
    /// Create an assembler keeping up to `media_per_result` URLs per text
    /// result.
    pub fn new(media_per_result: usize) -> Self {
        ResultAssembler { media_per_result }
    }

    /// Assemble the document-grouped text shape, ordered by (title priority,
    /// title length, index rank) and truncated to the plan's cap.
    pub fn assemble_text(&self, hits: Vec<PageHit>, plan: &SearchPlan) -> Vec<RankedResult> {
        let mut results: Vec<RankedResult> = hits
            .into_iter()
            .enumerate()
            .map(|(rank, hit)| {
                let priority = TitlePriority::of(&hit.page.title, &plan.title_query);
                let mut media = order_media(split_media(hit.media.as_deref()), plan.predicate.terms());
                media.truncate(self.media_per_result);

                let description = hit
                    .page
                    .description
                    .filter(|d| !d.trim().is_empty())
                    .or_else(|| hit.page.content.as_deref().and_then(extract_description));

                RankedResult {
                    title_length: hit.page.title.chars().count(),
                    title: hit.page.title,
                    url: hit.page.url,
                    description,
                    content: hit.page.content,
                    favicon: hit.page.favicon,
                    media,
                    title_priority: priority.rank(),
                    rank,
                    personalization_score: 0,
                }
            })
            .collect();

        results.sort_by_key(|r| (r.title_priority, r.title_length, r.rank));
        results.truncate(plan.result_cap);
        results
    }

    /// Assemble the flat image shape: every (row, media URL) pair,
    /// deduplicated globally (first occurrence wins), ordered by (title
    /// priority, format priority, token match, title length, index rank) and
    /// truncated to the plan's cap.
    pub fn assemble_images(&self, hits: Vec<PageHit>, plan: &SearchPlan) -> Vec<MediaResult> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for (rank, hit) in hits.into_iter().enumerate() {
            let priority = TitlePriority::of(&hit.page.title, &plan.title_query);
            let title_length = hit.page.title.chars().count();

            for media_url in split_media(hit.media.as_deref()) {
                if !seen.insert(media_url.clone()) {
                    continue;
                }
                results.push(MediaResult {
                    format: MediaFormat::classify(&media_url),
                    media_url,
                    title: hit.page.title.clone(),
                    page_url: hit.page.url.clone(),
                    title_priority: priority.rank(),
                    title_length,
                    rank,
                });
            }
        }

        results.sort_by_key(|r| {
            (
                r.title_priority,
                r.format.priority(),
                !url_matches_tokens(&r.media_url, plan.predicate.terms()),
                r.title_length,
                r.rank,
            )
        });
        results.truncate(plan.result_cap);
        results
    }
}

/// Split a concatenated media column, dropping blank segments and duplicate
/// URLs while preserving order. Malformed input is never fatal.
pub fn split_media(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    raw.split(MEDIA_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter(|segment| seen.insert(segment.to_string()))
        .map(str::to_string)
        .collect()
}

/// Order media URLs by format-priority class; inside each class, URLs that
/// contain a normalized query token come first. Both partitions are stable.
pub fn order_media(urls: Vec<String>, tokens: &[String]) -> Vec<String> {
    let mut classed: Vec<(u8, bool, usize, String)> = urls
        .into_iter()
        .enumerate()
        .map(|(position, url)| {
            let format = MediaFormat::classify(&url);
            let matches = url_matches_tokens(&url, tokens);
            (format.priority(), !matches, position, url)
        })
        .collect();

    classed.sort_by(|a, b| (a.0, a.1, a.2).cmp(&(b.0, b.1, b.2)));
    classed.into_iter().map(|(_, _, _, url)| url).collect()
}

fn url_matches_tokens(url: &str, tokens: &[String]) -> bool {
    let url = url.to_lowercase();
    tokens.iter().any(|token| url.contains(token.as_str()))
}

/// Derive a description from content: the first sentence whose trimmed
/// length falls in [20, 200] characters. Returns `None` when nothing
/// qualifies; a description is never fabricated.
pub fn extract_description(content: &str) -> Option<String> {
    content
        .split(['.', '!', '?'])
        .map(str::trim)
        .find(|sentence| {
            let len = sentence.chars().count();
            (20..=200).contains(&len)
        })
        .map(str::to_string)
}
