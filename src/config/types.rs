//! Configuration data model.
//!
//! This module holds struct/enum definitions plus default values. Source
//! discovery and resolution live in sibling modules so precedence behavior
//! stays in one place.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{DEFAULT_API_BASE_URL, DEFAULT_RETRY_DELAY_SECS, DEFAULT_TIMEOUT_SECS};
use crate::api::{PlaceStatus, RetryOptions};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiConfig,
    pub network: NetworkConfig,
    /// Default retry policy; `None` means lookups are not retried.
    pub retry: Option<RetryOptions>,
}

/// Resolved connection settings used by the HTTP client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    /// Value of the `sensor` flag sent with every request.
    pub sensor: bool,
    /// Language applied to requests that don't set one.
    pub language: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.into(),
            api_key: String::new(),
            sensor: false,
            language: None,
        }
    }
}

/// Network/HTTP timeout policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Timeout for one HTTP round trip.
    pub timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Where the config text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicit `--config` path.
    Explicit(PathBuf),
    /// `./places.toml`.
    Local,
    /// `<config root>/places/places.toml`.
    Global(PathBuf),
    /// No file found; built-in defaults.
    BuiltInDefaults,
}

/// Configuration plus the source it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

// ---------------------------------------------------------------------------
// On-disk shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileConfig {
    pub(super) api: FileApiConfig,
    pub(super) network: NetworkConfig,
    pub(super) retry: Option<FileRetryConfig>,
}

/// `[api]` as written in the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(super) struct FileApiConfig {
    pub(super) base_url: String,
    pub(super) api_key: String,
    pub(super) api_key_env: Option<String>,
    pub(super) api_key_file: Option<String>,
    pub(super) sensor: bool,
    pub(super) language: Option<String>,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.into(),
            api_key: String::new(),
            api_key_env: None,
            api_key_file: None,
            sensor: false,
            language: None,
        }
    }
}

/// `[retry]` as written in the file. `max = 0` disables retries; `status`
/// defaults to `INVALID_REQUEST`, matching `--retry-status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(super) struct FileRetryConfig {
    pub(super) max: u32,
    pub(super) status: StatusList,
    pub(super) delay_secs: f64,
    pub(super) timeout_secs: Option<f64>,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            max: 0,
            status: StatusList::One(PlaceStatus::InvalidRequest),
            delay_secs: DEFAULT_RETRY_DELAY_SECS,
            timeout_secs: None,
        }
    }
}

/// `status = "X"` or `status = ["X", "Y"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum StatusList {
    One(PlaceStatus),
    Many(Vec<PlaceStatus>),
}

impl StatusList {
    pub(super) fn into_vec(self) -> Vec<PlaceStatus> {
        match self {
            Self::One(status) => vec![status],
            Self::Many(statuses) => statuses,
        }
    }
}
