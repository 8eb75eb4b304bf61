use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Upstream providers aggregated by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    RandomUser,
    RestCountries,
    ExchangeRate,
    NewsApi,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RandomUser => "randomuser",
            Self::RestCountries => "restcountries",
            Self::ExchangeRate => "exchangerate",
            Self::NewsApi => "newsapi",
        }
    }

    /// Human-readable label used in caller-facing failure messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::RandomUser => "RandomUser",
            Self::RestCountries => "REST Countries",
            Self::ExchangeRate => "ExchangeRate",
            Self::NewsApi => "NewsAPI",
        }
    }

    /// Message reported when the provider answers with a non-success status.
    pub fn failed_message(self) -> String {
        match self {
            Self::NewsApi => String::from("NewsAPI failed"),
            other => format!("{} API failed", other.label()),
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
