use std::net::SocketAddr;

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use passport_core::{ConfigError, Stage, StageError, StageErrorKind};
use serde::Serialize;
use thiserror::Error;

/// Startup and serving failures mapped to exit codes.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Dotenv(_) => 2,
            Self::Logging(_) => 3,
            Self::Bind { .. } => 4,
            Self::Io(_) => 10,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    stage: Option<Stage>,
}

/// Failure response of an API endpoint: a status plus `{error}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    stage: Option<Stage>,
}

impl ApiError {
    /// Maps a stage failure on `endpoint` to its response.
    ///
    /// Internal failures never expose their detail.
    pub fn from_stage(endpoint: &str, error: StageError) -> Self {
        let status = status_for(error.kind());
        let message = match error.kind() {
            StageErrorKind::Internal => format!("Server error in {endpoint}"),
            _ => error.message().to_owned(),
        };
        Self {
            status,
            message,
            stage: None,
        }
    }

    /// Attributes the failure to a pipeline stage (`where` in the body).
    pub fn at_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn panicked() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::from("Internal server error"),
            stage: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Undecodable query strings are caller errors reported as `{error}`.
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let error = StageError::validation(rejection.body_text());
        Self {
            status: status_for(error.kind()),
            message: error.message().to_owned(),
            stage: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.message,
            stage: self.stage,
        };
        (self.status, Json(body)).into_response()
    }
}

const fn status_for(kind: StageErrorKind) -> StatusCode {
    match kind {
        StageErrorKind::Validation => StatusCode::BAD_REQUEST,
        StageErrorKind::Upstream => StatusCode::BAD_GATEWAY,
        StageErrorKind::Configuration | StageErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
