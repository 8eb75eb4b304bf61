//! Client-side headline refinement.
//!
//! The news provider's full-text search does not guarantee the country
//! appears in the title. The filter keeps only headlines whose case-folded
//! title contains the case-folded needle, then caps the list. It runs on the
//! single page already fetched; no extra pages are requested to refill it.

use serde_json::Value;

use crate::adapters::news_api::normalize_article;
use crate::domain::NewsArticle;

/// Articles requested from the provider per call.
pub const NEWS_PAGE_SIZE: usize = 20;

/// Articles kept after filtering.
pub const MAX_ARTICLES: usize = 5;

/// Keeps articles whose title contains `needle` (case-insensitive), in
/// upstream order, truncated to [`MAX_ARTICLES`].
///
/// A missing or non-string title counts as `""`.
pub fn filter_articles(raw: &[Value], needle: &str) -> Vec<NewsArticle> {
    let needle = needle.to_lowercase();

    raw.iter()
        .filter(|article| title_matches(article, &needle))
        .take(MAX_ARTICLES)
        .map(normalize_article)
        .collect()
}

fn title_matches(article: &Value, folded_needle: &str) -> bool {
    article
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase()
        .contains(folded_needle)
}
