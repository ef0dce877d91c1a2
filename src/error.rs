//! Error types for the Places client.

use std::time::Duration;
use thiserror::Error;

use crate::api::status::PlaceStatus;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// TransportError
// ---------------------------------------------------------------------------

/// Failures below the Places status vocabulary: the request never produced a
/// classifiable envelope.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network / reqwest-level error (DNS, connect, timeout).
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx HTTP status.
    #[error("status {code}: {body}")]
    Status { code: u16, body: String },
    /// Body was not a JSON object with a `status` field.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// PlacesError
// ---------------------------------------------------------------------------

/// Where an invalid-request verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOrigin {
    /// Rejected before dispatch by parameter validation.
    Local,
    /// Rejected by the service with `INVALID_REQUEST`.
    Remote,
}

/// Every way a Places lookup can fail.
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("invalid request ({origin:?}): {message}")]
    InvalidRequest {
        origin: RequestOrigin,
        message: String,
    },
    #[error("request denied: {}", .message.as_deref().unwrap_or("no detail"))]
    RequestDenied { message: Option<String> },
    #[error("not found: {}", .message.as_deref().unwrap_or("no detail"))]
    NotFound { message: Option<String> },
    #[error("over query limit: {}", .message.as_deref().unwrap_or("no detail"))]
    OverQueryLimit { message: Option<String> },
    #[error("unknown status `{status}`: {}", .message.as_deref().unwrap_or("no detail"))]
    Unknown {
        status: String,
        message: Option<String>,
    },
    /// Retry policy ran out of attempts.
    #[error("gave up after {attempts} attempts; last status {status}")]
    Retry {
        attempts: u32,
        status: PlaceStatus,
        elapsed: Duration,
    },
    /// Retry policy hit its wall-clock ceiling.
    #[error("retry timed out after {elapsed:?} ({attempts} attempts); last status {status}")]
    RetryTimeout {
        attempts: u32,
        status: PlaceStatus,
        elapsed: Duration,
    },
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    /// A successful response could not be written back out as JSON.
    #[error("failed to render response: {0}")]
    Render(#[source] serde_json::Error),
}

impl PlacesError {
    /// Local parameter-validation failure.
    pub fn local(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            origin: RequestOrigin::Local,
            message: message.into(),
        }
    }

    /// Map a failing remote status onto its typed error.
    ///
    /// Success statuses have no error form and yield `None`.
    pub fn from_status(status: &PlaceStatus, message: Option<String>) -> Option<Self> {
        let err = match status {
            PlaceStatus::Ok | PlaceStatus::ZeroResults => return None,
            PlaceStatus::InvalidRequest => Self::InvalidRequest {
                origin: RequestOrigin::Remote,
                message: message.unwrap_or_else(|| "INVALID_REQUEST".to_string()),
            },
            PlaceStatus::RequestDenied => Self::RequestDenied { message },
            PlaceStatus::NotFound => Self::NotFound { message },
            PlaceStatus::OverQueryLimit => Self::OverQueryLimit { message },
            PlaceStatus::Unknown(raw) => Self::Unknown {
                status: raw.clone(),
                message,
            },
        };
        Some(err)
    }

    /// Remote status behind this error, when the service produced one.
    pub fn status(&self) -> Option<PlaceStatus> {
        match self {
            Self::InvalidRequest {
                origin: RequestOrigin::Remote,
                ..
            } => Some(PlaceStatus::InvalidRequest),
            Self::RequestDenied { .. } => Some(PlaceStatus::RequestDenied),
            Self::NotFound { .. } => Some(PlaceStatus::NotFound),
            Self::OverQueryLimit { .. } => Some(PlaceStatus::OverQueryLimit),
            Self::Unknown { status, .. } => Some(PlaceStatus::Unknown(status.clone())),
            Self::Retry { status, .. } | Self::RetryTimeout { status, .. } => Some(status.clone()),
            Self::InvalidRequest {
                origin: RequestOrigin::Local,
                ..
            }
            | Self::Transport(_)
            | Self::Config(_)
            | Self::Render(_) => None,
        }
    }

    /// True when the request was rejected before any network call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest {
                origin: RequestOrigin::Local,
                ..
            } | Self::Config(_)
        )
    }
}
