//! Single-call upstream stages.
//!
//! [`UpstreamClient`] performs exactly one GET per stage, classifies the
//! outcome, and hands the decoded payload to the provider's normalizer. Every
//! call settles into a [`StageOutcome`]; nothing is retried.
//!
//! | Outcome | Kind |
//! |---------|------|
//! | required key absent (checked before any I/O) | `Configuration` |
//! | required caller input absent or empty | `Validation` |
//! | transport error, non-2xx, malformed JSON, missing root object | `Upstream` |

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::adapters::{exchange_rate, news_api, random_user, rest_countries};
use crate::config::UpstreamConfig;
use crate::domain::{CountryProfile, NewsResult, RateQuote, UserProfile};
use crate::error::{StageError, StageOutcome};
use crate::http_client::{HttpClient, HttpRequest};
use crate::provider::ProviderId;

/// Issues provider calls with a shared transport and read-only configuration.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Arc<dyn HttpClient>,
    config: Arc<UpstreamConfig>,
}

impl UpstreamClient {
    pub fn new(http: Arc<dyn HttpClient>, config: Arc<UpstreamConfig>) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    pub async fn random_user(&self) -> StageOutcome<UserProfile> {
        let request = random_user::request(&self.config);
        self.fetch(ProviderId::RandomUser, request, random_user::normalize)
            .await
    }

    /// Looks up a country by its exact primary name.
    pub async fn country(&self, name: &str) -> StageOutcome<CountryProfile> {
        let name = require_param(name, "Missing country name")?;
        let request = rest_countries::request(&self.config, name);
        self.fetch(ProviderId::RestCountries, request, rest_countries::normalize)
            .await
    }

    /// Fetches USD and KZT rates for `base`.
    ///
    /// The key check precedes input validation, so a deployment without a
    /// key reports configuration failure for every call.
    pub async fn rates(&self, base: &str) -> StageOutcome<RateQuote> {
        self.config.require_exchangerate_key()?;
        let base = require_param(base, "Missing base currency")?;
        let request = exchange_rate::request(&self.config, base)?;
        self.fetch(ProviderId::ExchangeRate, request, |payload| {
            exchange_rate::normalize(base, payload)
        })
        .await
    }

    /// Fetches up to five headlines whose titles mention `country`.
    pub async fn news(&self, country: &str) -> StageOutcome<NewsResult> {
        self.config.require_news_key()?;
        let country = require_param(country, "Missing country")?;
        let request = news_api::request(&self.config, country)?;
        self.fetch(ProviderId::NewsApi, request, |payload| {
            news_api::normalize(country, payload)
        })
        .await
    }

    async fn fetch<T, F>(
        &self,
        provider: ProviderId,
        request: HttpRequest,
        normalize: F,
    ) -> StageOutcome<T>
    where
        F: FnOnce(&Value) -> StageOutcome<T>,
    {
        let url = self.config.redact(&request.url);
        debug!(%provider, %url, "calling upstream");

        let response = self.http.execute(request).await.map_err(|error| {
            warn!(%provider, %url, error = %error, "upstream transport error");
            StageError::upstream(format!("{} unreachable", provider.label()))
        })?;

        if !response.is_success() {
            warn!(%provider, %url, status = response.status, "upstream returned failure status");
            return Err(StageError::upstream(provider.failed_message()));
        }

        let payload: Value = serde_json::from_str(&response.body).map_err(|error| {
            warn!(%provider, %url, error = %error, "upstream body is not JSON");
            StageError::upstream(format!("{} returned malformed JSON", provider.label()))
        })?;

        normalize(&payload)
    }
}

/// Absent and empty inputs are both reported as `message`.
fn require_param<'a>(value: &'a str, message: &str) -> StageOutcome<&'a str> {
    if value.is_empty() {
        return Err(StageError::validation(message));
    }
    Ok(value)
}
