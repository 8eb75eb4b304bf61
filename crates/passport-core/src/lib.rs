//! # Passport Core
//!
//! Aggregation pipeline for the passport profile service.
//!
//! ## Overview
//!
//! This crate fetches a random person and then, keyed by that person's
//! country, the country's facts, exchange rates for its currency, and recent
//! headlines mentioning it:
//!
//! - **Normalizers** that map each provider's loosely-typed JSON into closed records
//! - **Upstream client** performing exactly one call per stage
//! - **Article filter** refining headlines client-side
//! - **Pipeline orchestrator** sequencing stages with per-branch failure isolation
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Per-provider request builders and normalizers |
//! | [`article_filter`] | Title match and truncation for headlines |
//! | [`config`] | Immutable upstream configuration and API keys |
//! | [`domain`] | Normalized records (user, country, rates, news) |
//! | [`error`] | Stage error taxonomy |
//! | [`http_client`] | HTTP client abstraction |
//! | [`pipeline`] | Stage sequencing and the combined report |
//! | [`provider`] | Provider identifiers and labels |
//! | [`upstream`] | Single-call stage execution |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use passport_core::{PipelineOrchestrator, ReqwestHttpClient, UpstreamClient, UpstreamConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = UpstreamConfig::builder().from_env()?.build();
//!     let client = UpstreamClient::new(Arc::new(ReqwestHttpClient::new()), Arc::new(config));
//!
//!     let report = PipelineOrchestrator::new(client).run().await?;
//!     println!("{} lives in {}", report.user.first_name, report.user.country);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Stages return [`StageOutcome`]; callers branch on [`StageErrorKind`]:
//!
//! ```rust
//! use passport_core::{StageError, StageErrorKind};
//!
//! fn status_for(error: &StageError) -> u16 {
//!     match error.kind() {
//!         StageErrorKind::Validation => 400,
//!         StageErrorKind::Upstream => 502,
//!         StageErrorKind::Configuration | StageErrorKind::Internal => 500,
//!     }
//! }
//!
//! assert_eq!(status_for(&StageError::validation("Missing country")), 400);
//! ```
//!
//! ## Security
//!
//! - API keys are read once at startup and never logged
//! - All HTTP requests use TLS via rustls

pub mod adapters;
pub mod article_filter;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod pipeline;
pub mod provider;
pub mod upstream;

// Configuration
pub use config::{ApiKey, ConfigError, ProviderEndpoints, UpstreamConfig, UpstreamConfigBuilder};

// Domain models
pub use domain::{CountryProfile, NewsArticle, NewsResult, RateQuote, UserProfile, NOT_AVAILABLE};

// Error types
pub use error::{StageError, StageErrorKind, StageOutcome};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, ScriptedHttpClient,
};

// Pipeline
pub use pipeline::{PipelineOrchestrator, ProfileReport, Section, Stage};

// Provider identifiers
pub use provider::ProviderId;

// Upstream stages
pub use article_filter::filter_articles;
pub use upstream::UpstreamClient;
