//! RandomUser provider: one random person per call.

use serde_json::Value;

use crate::adapters::{scalar_text, str_at, text, text_or, KEY_NOT_REQUIRED, OPTIONAL_KEY_HEADER};
use crate::config::UpstreamConfig;
use crate::domain::UserProfile;
use crate::error::{StageError, StageOutcome};
use crate::http_client::HttpRequest;

pub fn request(config: &UpstreamConfig) -> HttpRequest {
    let key = config
        .randomuser_key
        .as_ref()
        .map(|key| key.expose())
        .unwrap_or(KEY_NOT_REQUIRED);

    HttpRequest::get(format!("{}/api/?results=1", config.endpoints.randomuser))
        .with_header(OPTIONAL_KEY_HEADER, key)
        .with_timeout_ms(config.timeout_ms)
}

/// Maps `results[0]` into a [`UserProfile`].
///
/// # Errors
///
/// Upstream failure when `results` is empty or the person has no country,
/// since every downstream stage is keyed by it.
pub fn normalize(payload: &Value) -> StageOutcome<UserProfile> {
    let person = payload
        .pointer("/results/0")
        .filter(|person| person.is_object())
        .ok_or_else(|| StageError::upstream("RandomUser empty result"))?;

    let country = str_at(person, "/location/country")
        .filter(|country| !country.trim().is_empty())
        .ok_or_else(|| StageError::upstream("RandomUser missing country"))?
        .to_owned();

    let street_name = text(person, "/location/street/name");
    let street_number = scalar_text(person, "/location/street/number");

    Ok(UserProfile {
        first_name: text(person, "/name/first"),
        last_name: text(person, "/name/last"),
        gender: text(person, "/gender"),
        picture_url: text_or(person, "/picture/large", ""),
        age: person
            .pointer("/dob/age")
            .and_then(Value::as_u64)
            .and_then(|age| u32::try_from(age).ok()),
        date_of_birth: text(person, "/dob/date"),
        city: text(person, "/location/city"),
        country,
        full_address: format!("{street_name} {street_number}").trim().to_owned(),
    })
}
