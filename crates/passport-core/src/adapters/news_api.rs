//! NewsAPI provider: English headlines mentioning a country.

use serde_json::Value;

use crate::adapters::{text, text_or};
use crate::article_filter::{filter_articles, NEWS_PAGE_SIZE};
use crate::config::UpstreamConfig;
use crate::domain::{NewsArticle, NewsResult};
use crate::error::StageOutcome;
use crate::http_client::HttpRequest;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Builds the `everything` search: English only, newest first, one page.
///
/// # Errors
///
/// Configuration failure when `NEWS_API_KEY` is absent.
pub fn request(config: &UpstreamConfig, country: &str) -> StageOutcome<HttpRequest> {
    let key = config.require_news_key()?;

    Ok(HttpRequest::get(format!(
        "{}/v2/everything?q={}&language=en&pageSize={}&sortBy=publishedAt",
        config.endpoints.newsapi,
        urlencoding::encode(country),
        NEWS_PAGE_SIZE
    ))
    .with_header(API_KEY_HEADER, key.expose())
    .with_timeout_ms(config.timeout_ms))
}

/// Filters the returned page down to headlines naming `country`.
pub fn normalize(country: &str, payload: &Value) -> StageOutcome<NewsResult> {
    let raw = payload
        .get("articles")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    Ok(NewsResult::new(country, filter_articles(raw, country)))
}

pub fn normalize_article(article: &Value) -> NewsArticle {
    NewsArticle {
        title: text(article, "/title"),
        image_url: text_or(article, "/urlToImage", ""),
        description: text_or(article, "/description", ""),
        article_url: text_or(article, "/url", ""),
        source_name: text(article, "/source/name"),
    }
}
