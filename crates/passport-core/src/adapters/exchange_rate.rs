//! ExchangeRate provider: latest rates for one base currency.

use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::domain::RateQuote;
use crate::error::StageOutcome;
use crate::http_client::HttpRequest;

/// Builds the keyed `latest/<base>` request.
///
/// # Errors
///
/// Configuration failure when `EXCHANGERATE_API_KEY` is absent; no request
/// is built in that case.
pub fn request(config: &UpstreamConfig, base: &str) -> StageOutcome<HttpRequest> {
    let key = config.require_exchangerate_key()?;

    Ok(HttpRequest::get(format!(
        "{}/v6/{}/latest/{}",
        config.endpoints.exchangerate,
        key.expose(),
        urlencoding::encode(base)
    ))
    .with_timeout_ms(config.timeout_ms))
}

/// Keeps only USD and KZT from the provider's rate table.
pub fn normalize(base: &str, payload: &Value) -> StageOutcome<RateQuote> {
    Ok(RateQuote {
        base: base.to_owned(),
        usd_rate: rate(payload, "USD"),
        kzt_rate: rate(payload, "KZT"),
    })
}

fn rate(payload: &Value, code: &str) -> Option<f64> {
    payload
        .get("conversion_rates")
        .and_then(|rates| rates.get(code))
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
}
