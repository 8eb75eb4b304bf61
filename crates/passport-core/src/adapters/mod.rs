//! Provider adapters.
//!
//! Each adapter owns two things for exactly one provider: the outbound
//! [`HttpRequest`](crate::HttpRequest) shape and a pure `normalize` function
//! mapping the decoded JSON payload into a domain record. Normalizers never
//! panic; absent or mistyped optional fields fall back to defined defaults.

pub mod exchange_rate;
pub mod news_api;
pub mod random_user;
pub mod rest_countries;

use serde_json::Value;

use crate::domain::NOT_AVAILABLE;

/// Header carrying the optional key for providers that accept but do not need one.
pub(crate) const OPTIONAL_KEY_HEADER: &str = "X-API-KEY";
pub(crate) const KEY_NOT_REQUIRED: &str = "NOT_REQUIRED";

/// String at `pointer`, treating `null` and non-strings as absent.
pub(crate) fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

/// String at `pointer`, or `default` when absent.
pub(crate) fn text_or(value: &Value, pointer: &str, default: &str) -> String {
    str_at(value, pointer).unwrap_or(default).to_owned()
}

/// String at `pointer`, or the `"N/A"` sentinel when absent.
pub(crate) fn text(value: &Value, pointer: &str) -> String {
    text_or(value, pointer, NOT_AVAILABLE)
}

/// Scalar at `pointer` rendered as text; numbers keep their JSON spelling.
pub(crate) fn scalar_text(value: &Value, pointer: &str) -> String {
    match value.pointer(pointer) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::from(NOT_AVAILABLE),
    }
}
