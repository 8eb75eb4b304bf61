//! Immutable upstream configuration.
//!
//! [`UpstreamConfig`] is assembled once at startup and shared read-only by
//! every request. Provider keys are all optional at build time; a key that a
//! provider cannot work without is checked when that provider is first called
//! and reported as a configuration failure for that stage only.
//!
//! # Environment Variables
//!
//! | Variable | Purpose | Default |
//! |----------|---------|---------|
//! | `RANDOMUSER_API_KEY` | optional `X-API-KEY` for RandomUser | `NOT_REQUIRED` header |
//! | `RESTCOUNTRIES_API_KEY` | optional `X-API-KEY` for REST Countries | `NOT_REQUIRED` header |
//! | `EXCHANGERATE_API_KEY` | required by the rates stage | - |
//! | `NEWS_API_KEY` | required by the news stage | - |
//! | `PASSPORT_RANDOMUSER_URL` | RandomUser base URL | `https://randomuser.me` |
//! | `PASSPORT_RESTCOUNTRIES_URL` | REST Countries base URL | `https://restcountries.com` |
//! | `PASSPORT_EXCHANGERATE_URL` | ExchangeRate base URL | `https://v6.exchangerate-api.com` |
//! | `PASSPORT_NEWSAPI_URL` | NewsAPI base URL | `https://newsapi.org` |
//! | `PASSPORT_UPSTREAM_TIMEOUT_MS` | per-call timeout | transport default |

use std::env;
use std::fmt::{Debug, Display, Formatter};

use thiserror::Error;
use zeroize::Zeroize;

use crate::error::StageError;

pub const RANDOMUSER_API_KEY: &str = "RANDOMUSER_API_KEY";
pub const RESTCOUNTRIES_API_KEY: &str = "RESTCOUNTRIES_API_KEY";
pub const EXCHANGERATE_API_KEY: &str = "EXCHANGERATE_API_KEY";
pub const NEWS_API_KEY: &str = "NEWS_API_KEY";

const RANDOMUSER_URL: &str = "PASSPORT_RANDOMUSER_URL";
const RESTCOUNTRIES_URL: &str = "PASSPORT_RESTCOUNTRIES_URL";
const EXCHANGERATE_URL: &str = "PASSPORT_EXCHANGERATE_URL";
const NEWSAPI_URL: &str = "PASSPORT_NEWSAPI_URL";
const UPSTREAM_TIMEOUT_MS: &str = "PASSPORT_UPSTREAM_TIMEOUT_MS";

/// Errors raised while assembling configuration at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer number of milliseconds, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must be an http(s) URL, got '{value}'")]
    InvalidBaseUrl { var: &'static str, value: String },
}

/// Provider API key. Never printed; wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Replaces every occurrence of the key in `text`.
    pub fn redact(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_owned();
        }
        text.replace(self.0.as_str(), "[REDACTED]")
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

impl Display for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Base URLs of the four providers, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub randomuser: String,
    pub restcountries: String,
    pub exchangerate: String,
    pub newsapi: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            randomuser: String::from("https://randomuser.me"),
            restcountries: String::from("https://restcountries.com"),
            exchangerate: String::from("https://v6.exchangerate-api.com"),
            newsapi: String::from("https://newsapi.org"),
        }
    }
}

/// Read-only configuration shared by all requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub endpoints: ProviderEndpoints,
    pub randomuser_key: Option<ApiKey>,
    pub restcountries_key: Option<ApiKey>,
    pub exchangerate_key: Option<ApiKey>,
    pub news_key: Option<ApiKey>,
    /// Unset means no per-call timeout beyond the transport's.
    pub timeout_ms: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        UpstreamConfigBuilder::new().build()
    }
}

impl UpstreamConfig {
    pub fn builder() -> UpstreamConfigBuilder {
        UpstreamConfigBuilder::new()
    }

    pub fn require_exchangerate_key(&self) -> Result<&ApiKey, StageError> {
        self.exchangerate_key
            .as_ref()
            .ok_or_else(|| StageError::missing_configuration(EXCHANGERATE_API_KEY))
    }

    pub fn require_news_key(&self) -> Result<&ApiKey, StageError> {
        self.news_key
            .as_ref()
            .ok_or_else(|| StageError::missing_configuration(NEWS_API_KEY))
    }

    /// Strips every configured key from `text` before it is logged.
    pub fn redact(&self, text: &str) -> String {
        [
            &self.randomuser_key,
            &self.restcountries_key,
            &self.exchangerate_key,
            &self.news_key,
        ]
        .into_iter()
        .flatten()
        .fold(text.to_owned(), |acc, key| key.redact(&acc))
    }
}

/// Builder for [`UpstreamConfig`].
///
/// ```rust,ignore
/// use passport_core::UpstreamConfig;
///
/// let config = UpstreamConfig::builder()
///     .from_env()?
///     .with_news_key("local-news-key")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct UpstreamConfigBuilder {
    config: UpstreamConfig,
}

impl Default for UpstreamConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UpstreamConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: UpstreamConfig {
                endpoints: ProviderEndpoints::default(),
                randomuser_key: None,
                restcountries_key: None,
                exchangerate_key: None,
                news_key: None,
                timeout_ms: None,
            },
        }
    }

    /// Overlays values found in the process environment.
    pub fn from_env(self) -> Result<Self, ConfigError> {
        self.from_lookup(|name| env::var(name).ok())
    }

    /// Overlays values from an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        if let Some(key) = read(RANDOMUSER_API_KEY) {
            self.config.randomuser_key = Some(ApiKey::new(key));
        }
        if let Some(key) = read(RESTCOUNTRIES_API_KEY) {
            self.config.restcountries_key = Some(ApiKey::new(key));
        }
        if let Some(key) = read(EXCHANGERATE_API_KEY) {
            self.config.exchangerate_key = Some(ApiKey::new(key));
        }
        if let Some(key) = read(NEWS_API_KEY) {
            self.config.news_key = Some(ApiKey::new(key));
        }

        let endpoints = &mut self.config.endpoints;
        for (var, slot) in [
            (RANDOMUSER_URL, &mut endpoints.randomuser),
            (RESTCOUNTRIES_URL, &mut endpoints.restcountries),
            (EXCHANGERATE_URL, &mut endpoints.exchangerate),
            (NEWSAPI_URL, &mut endpoints.newsapi),
        ] {
            if let Some(value) = read(var) {
                *slot = parse_base_url(var, &value)?;
            }
        }

        if let Some(value) = read(UPSTREAM_TIMEOUT_MS) {
            self.config.timeout_ms = match value.parse::<u64>() {
                Ok(timeout_ms) if timeout_ms > 0 => Some(timeout_ms),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: UPSTREAM_TIMEOUT_MS,
                        value,
                    })
                }
            };
        }

        Ok(self)
    }

    pub fn with_randomuser_key(mut self, key: impl Into<String>) -> Self {
        self.config.randomuser_key = Some(ApiKey::new(key));
        self
    }

    pub fn with_exchangerate_key(mut self, key: impl Into<String>) -> Self {
        self.config.exchangerate_key = Some(ApiKey::new(key));
        self
    }

    pub fn with_news_key(mut self, key: impl Into<String>) -> Self {
        self.config.news_key = Some(ApiKey::new(key));
        self
    }

    pub fn build(self) -> UpstreamConfig {
        self.config
    }
}

fn parse_base_url(var: &'static str, value: &str) -> Result<String, ConfigError> {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl {
            var,
            value: value.to_owned(),
        });
    }
    Ok(value.trim_end_matches('/').to_owned())
}
