//! Dependent four-stage aggregation.
//!
//! ```text
//! User ──┬── Country ── Rates
//!        └── News
//! ```
//!
//! User gates everything. The two branches run concurrently on the calling
//! task and are awaited together; neither branch observes or cancels the
//! other.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::{CountryProfile, NewsResult, RateQuote, UserProfile};
use crate::error::{StageError, StageOutcome};
use crate::upstream::UpstreamClient;

/// Pipeline stage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    User,
    Country,
    Rates,
    News,
}

impl Stage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Country => "Country",
            Self::Rates => "Rates",
            Self::News => "News",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settled state of one downstream stage as shown to the consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Section<T> {
    Ok {
        data: T,
    },
    Error {
        #[serde(rename = "where")]
        stage: Stage,
        message: String,
    },
    /// Not run because a prerequisite stage failed. The prerequisite's own
    /// section carries the failure.
    Blocked {
        #[serde(rename = "blockedBy")]
        blocked_by: Stage,
    },
}

impl<T> Section<T> {
    pub fn from_outcome(stage: Stage, outcome: StageOutcome<T>) -> Self {
        match outcome {
            Ok(data) => Self::Ok { data },
            Err(error) => Self::Error {
                stage,
                message: error.message().to_owned(),
            },
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ok { data } => Some(data),
            _ => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// Combined result of a pipeline run whose User stage succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReport {
    pub request_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub user: UserProfile,
    pub country: Section<CountryProfile>,
    pub rates: Section<RateQuote>,
    pub news: Section<NewsResult>,
}

/// Sequences the four stages by their data dependencies.
#[derive(Clone)]
pub struct PipelineOrchestrator {
    client: UpstreamClient,
}

impl PipelineOrchestrator {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &UpstreamClient {
        &self.client
    }

    /// Runs the pipeline once.
    ///
    /// A User failure is the only error returned; every other stage failure
    /// is reported inside its [`Section`].
    pub async fn run(&self) -> Result<ProfileReport, StageError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("pipeline", %request_id);
        self.run_stages(request_id).instrument(span).await
    }

    async fn run_stages(&self, request_id: Uuid) -> Result<ProfileReport, StageError> {
        let user = self.client.random_user().await.map_err(|error| {
            warn!(stage = %Stage::User, error = %error, "pipeline halted");
            error
        })?;
        debug!(country = %user.country, "user stage settled");

        let (country_branch, news) = tokio::join!(
            self.country_branch(&user.country),
            self.news_branch(&user.country),
        );
        let (country, rates) = country_branch;

        info!(
            country = section_status(&country),
            rates = section_status(&rates),
            news = section_status(&news),
            "pipeline settled"
        );

        Ok(ProfileReport {
            request_id,
            generated_at: OffsetDateTime::now_utc(),
            user,
            country,
            rates,
            news,
        })
    }

    async fn country_branch(
        &self,
        country_name: &str,
    ) -> (Section<CountryProfile>, Section<RateQuote>) {
        let country = match self.client.country(country_name).await {
            Ok(country) => country,
            Err(error) => {
                warn!(stage = %Stage::Country, error = %error, "branch failed; rates blocked");
                return (
                    Section::from_outcome(Stage::Country, Err(error)),
                    Section::Blocked {
                        blocked_by: Stage::Country,
                    },
                );
            }
        };

        // A missing currency still goes upstream as "N/A" and fails there.
        let rates = self.client.rates(&country.currency_code).await;
        if let Err(error) = &rates {
            warn!(stage = %Stage::Rates, error = %error, "stage failed");
        }

        (
            Section::Ok { data: country },
            Section::from_outcome(Stage::Rates, rates),
        )
    }

    async fn news_branch(&self, country_name: &str) -> Section<NewsResult> {
        let news = self.client.news(country_name).await;
        match &news {
            Ok(result) => debug!(kept = result.count, "news stage settled"),
            Err(error) => warn!(stage = %Stage::News, error = %error, "stage failed"),
        }
        Section::from_outcome(Stage::News, news)
    }
}

fn section_status<T>(section: &Section<T>) -> &'static str {
    match section {
        Section::Ok { .. } => "ok",
        Section::Error { .. } => "error",
        Section::Blocked { .. } => "blocked",
    }
}
