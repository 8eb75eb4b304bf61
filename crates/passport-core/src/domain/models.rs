//! Provider-neutral records returned by the normalizers and serialized as
//! the public JSON shapes.

use serde::{Deserialize, Serialize};

/// Stand-in for an absent optional string field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Normalized random person. `country` is always a real, non-empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    #[serde(rename = "picture")]
    pub picture_url: String,
    pub age: Option<u32>,
    #[serde(rename = "dob")]
    pub date_of_birth: String,
    pub city: String,
    pub country: String,
    pub full_address: String,
}

/// Normalized country facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryProfile {
    pub country_name: String,
    pub capital: String,
    pub languages: String,
    pub currency_code: String,
    pub currency_name: String,
    #[serde(rename = "flag")]
    pub flag_url: String,
}

/// USD and KZT rates for one base currency. Values are finite or `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub base: String,
    #[serde(rename = "USD")]
    pub usd_rate: Option<f64>,
    #[serde(rename = "KZT")]
    pub kzt_rate: Option<f64>,
}

/// Single headline kept by the article filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    #[serde(rename = "image")]
    pub image_url: String,
    pub description: String,
    #[serde(rename = "url")]
    pub article_url: String,
    #[serde(rename = "source")]
    pub source_name: String,
}

/// Filtered headlines for a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsResult {
    pub country: String,
    pub count: usize,
    pub articles: Vec<NewsArticle>,
}

impl NewsResult {
    pub fn new(country: impl Into<String>, articles: Vec<NewsArticle>) -> Self {
        Self {
            country: country.into(),
            count: articles.len(),
            articles,
        }
    }
}
