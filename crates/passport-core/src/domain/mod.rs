//! # Domain Records
//!
//! Closed, fully-populated records produced by the provider normalizers.
//!
//! | Type | Provider | JSON shape |
//! |------|----------|------------|
//! | [`UserProfile`] | RandomUser | `{firstName,lastName,gender,picture,age,dob,city,country,fullAddress}` |
//! | [`CountryProfile`] | REST Countries | `{countryName,capital,languages,currencyCode,currencyName,flag}` |
//! | [`RateQuote`] | ExchangeRate | `{base,USD,KZT}` |
//! | [`NewsResult`] | NewsAPI | `{country,count,articles}` |
//!
//! Absent optional strings are the [`NOT_AVAILABLE`] sentinel, absent numbers
//! are `None` (serialized as `null`). Image/URL fields that the presentation
//! layer renders directly default to the empty string instead.

mod models;

pub use models::{
    CountryProfile, NewsArticle, NewsResult, RateQuote, UserProfile, NOT_AVAILABLE,
};
