//! Stage-level error taxonomy.
//!
//! Every pipeline stage settles into a [`StageOutcome`]: either the
//! normalized record or a [`StageError`] carrying one of four kinds. Stage
//! errors never cross a stage boundary as panics; callers match on
//! [`StageError::kind`] to decide how to report them.

use std::fmt::{Display, Formatter};

/// Classification of a stage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageErrorKind {
    /// A required caller-supplied input is absent.
    Validation,
    /// A required secret or setting is absent at call time.
    Configuration,
    /// The upstream answered badly, answered nothing useful, or could not be reached.
    Upstream,
    /// Anything else.
    Internal,
}

impl StageErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Upstream => "upstream",
            Self::Internal => "internal",
        }
    }
}

impl Display for StageErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure produced by a single stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageError {
    kind: StageErrorKind,
    message: String,
}

/// Result of running one stage: the normalized record or the reason it failed.
pub type StageOutcome<T> = Result<T, StageError>;

impl StageError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: StageErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Missing configuration value, named by its environment variable.
    pub fn missing_configuration(env_var: &str) -> Self {
        Self {
            kind: StageErrorKind::Configuration,
            message: format!("Missing configuration: {env_var}"),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: StageErrorKind::Upstream,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: StageErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> StageErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            StageErrorKind::Validation => "stage.validation",
            StageErrorKind::Configuration => "stage.configuration",
            StageErrorKind::Upstream => "stage.upstream",
            StageErrorKind::Internal => "stage.internal",
        }
    }
}

impl Display for StageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for StageError {}
