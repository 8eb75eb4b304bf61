//! REST Countries provider: exact-name country lookup.

use serde_json::Value;

use crate::adapters::{str_at, KEY_NOT_REQUIRED, OPTIONAL_KEY_HEADER};
use crate::config::UpstreamConfig;
use crate::domain::{CountryProfile, NOT_AVAILABLE};
use crate::error::{StageError, StageOutcome};
use crate::http_client::HttpRequest;

/// Builds the `fullText=true` lookup: the name must match a country's primary
/// name exactly, not as a substring.
pub fn request(config: &UpstreamConfig, name: &str) -> HttpRequest {
    let key = config
        .restcountries_key
        .as_ref()
        .map(|key| key.expose())
        .unwrap_or(KEY_NOT_REQUIRED);

    HttpRequest::get(format!(
        "{}/v3.1/name/{}?fullText=true",
        config.endpoints.restcountries,
        urlencoding::encode(name)
    ))
    .with_header(OPTIONAL_KEY_HEADER, key)
    .with_timeout_ms(config.timeout_ms)
}

/// Maps the first matched country into a [`CountryProfile`].
pub fn normalize(payload: &Value) -> StageOutcome<CountryProfile> {
    let country = payload
        .as_array()
        .and_then(|matches| matches.first())
        .filter(|country| country.is_object())
        .ok_or_else(|| StageError::upstream("Country not found"))?;

    let country_name = str_at(country, "/name/common")
        .or_else(|| str_at(country, "/name/official"))
        .unwrap_or(NOT_AVAILABLE)
        .to_owned();

    let (currency_code, currency_name) = first_currency(country.get("currencies"));

    let flag_url = str_at(country, "/flags/png")
        .or_else(|| str_at(country, "/flags/svg"))
        .unwrap_or_default()
        .to_owned();

    Ok(CountryProfile {
        country_name,
        capital: capital(country.get("capital")),
        languages: languages(country.get("languages")),
        currency_code,
        currency_name,
        flag_url,
    })
}

fn capital(value: Option<&Value>) -> String {
    let capital = match value {
        Some(Value::Array(items)) => items.first().and_then(Value::as_str),
        Some(Value::String(capital)) => Some(capital.as_str()),
        _ => None,
    };
    capital.unwrap_or(NOT_AVAILABLE).to_owned()
}

/// Display names joined in document order.
fn languages(value: Option<&Value>) -> String {
    let names = value
        .and_then(Value::as_object)
        .map(|map| map.values().filter_map(Value::as_str).collect::<Vec<_>>())
        .unwrap_or_default();

    if names.is_empty() {
        String::from(NOT_AVAILABLE)
    } else {
        names.join(", ")
    }
}

/// First currency key in document order, with its display name.
fn first_currency(value: Option<&Value>) -> (String, String) {
    match value.and_then(Value::as_object).and_then(|map| map.iter().next()) {
        Some((code, details)) => (
            code.clone(),
            str_at(details, "/name").unwrap_or(NOT_AVAILABLE).to_owned(),
        ),
        None => (String::from(NOT_AVAILABLE), String::from(NOT_AVAILABLE)),
    }
}
