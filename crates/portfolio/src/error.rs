use crate::config::ConfigError;
use crate::contact::{ContactServiceError, NotifyError, RepositoryError};
use crate::pages;
use crate::projects::UpstreamFetchError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::any::Any;
use std::fmt;
use tracing::error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";
pub const NOT_FOUND_MESSAGE: &str = "404 Page Not Found";

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Database(sqlx::Error),
    Storage(RepositoryError),
    Notifier(NotifyError),
    Upstream(UpstreamFetchError),
    Contact(ContactServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Database(err) => write!(f, "database error: {}", err),
            AppError::Storage(err) => write!(f, "storage error: {}", err),
            AppError::Notifier(err) => write!(f, "notifier error: {}", err),
            AppError::Upstream(err) => write!(f, "upstream error: {}", err),
            AppError::Contact(err) => write!(f, "contact workflow error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Database(err) => Some(err),
            AppError::Storage(err) => Some(err),
            AppError::Notifier(err) => Some(err),
            AppError::Upstream(err) => Some(err),
            AppError::Contact(err) => Some(err),
        }
    }
}

/// Every fault renders the same generic page; details only reach the log.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(pages::error(INTERNAL_ERROR_MESSAGE)),
        )
            .into_response()
    }
}

/// Response for a handler that panicked; shaped for `CatchPanicLayer::custom`.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(panic = detail, "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(pages::error(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        Self::Database(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Storage(value)
    }
}

impl From<NotifyError> for AppError {
    fn from(value: NotifyError) -> Self {
        Self::Notifier(value)
    }
}

impl From<UpstreamFetchError> for AppError {
    fn from(value: UpstreamFetchError) -> Self {
        Self::Upstream(value)
    }
}

impl From<ContactServiceError> for AppError {
    fn from(value: ContactServiceError) -> Self {
        Self::Contact(value)
    }
}
