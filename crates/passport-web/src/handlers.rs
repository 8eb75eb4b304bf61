//! Endpoint handlers.
//!
//! | Route | Stage |
//! |-------|-------|
//! | `GET /api/random-user` | User |
//! | `GET /api/country?name=` | Country |
//! | `GET /api/rates?base=` | Rates |
//! | `GET /api/news?country=` | News |
//! | `GET /api/profile` | whole pipeline |
//! | `GET /health` | liveness |

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use passport_core::{CountryProfile, NewsResult, ProfileReport, RateQuote, Stage, UserProfile};
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CountryQuery {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RatesQuery {
    pub base: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    pub country: Option<String>,
}

pub async fn health() -> &'static str {
    "OK"
}

/// GET /api/random-user
pub async fn random_user(State(state): State<AppState>) -> Result<Json<UserProfile>, ApiError> {
    state
        .upstream()
        .random_user()
        .await
        .map(Json)
        .map_err(|error| ApiError::from_stage("/api/random-user", error))
}

/// GET /api/country
pub async fn country(
    State(state): State<AppState>,
    query: Result<Query<CountryQuery>, QueryRejection>,
) -> Result<Json<CountryProfile>, ApiError> {
    let Query(query) = query?;
    let name = query.name.unwrap_or_default();
    state
        .upstream()
        .country(&name)
        .await
        .map(Json)
        .map_err(|error| ApiError::from_stage("/api/country", error))
}

/// GET /api/rates
pub async fn rates(
    State(state): State<AppState>,
    query: Result<Query<RatesQuery>, QueryRejection>,
) -> Result<Json<RateQuote>, ApiError> {
    let Query(query) = query?;
    let base = query.base.unwrap_or_default();
    state
        .upstream()
        .rates(&base)
        .await
        .map(Json)
        .map_err(|error| ApiError::from_stage("/api/rates", error))
}

/// GET /api/news
pub async fn news(
    State(state): State<AppState>,
    query: Result<Query<NewsQuery>, QueryRejection>,
) -> Result<Json<NewsResult>, ApiError> {
    let Query(query) = query?;
    let country = query.country.unwrap_or_default();
    state
        .upstream()
        .news(&country)
        .await
        .map(Json)
        .map_err(|error| ApiError::from_stage("/api/news", error))
}

/// GET /api/profile
///
/// Only a User failure fails the request; downstream failures are sections
/// of the report.
pub async fn profile(State(state): State<AppState>) -> Result<Json<ProfileReport>, ApiError> {
    let report = state
        .orchestrator
        .run()
        .await
        .map_err(|error| ApiError::from_stage("/api/profile", error).at_stage(Stage::User))?;

    info!(request_id = %report.request_id, country = %report.user.country, "profile assembled");
    Ok(Json(report))
}
