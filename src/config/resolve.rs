//! Config-file to runtime-config resolution.

use std::time::Duration;

use crate::api::RetryOptions;
use crate::error::ConfigError;

use super::defaults::DEFAULT_API_BASE_URL;
use super::types::{FileApiConfig, FileConfig, FileRetryConfig};
use super::{ApiConfig, Config};

pub(super) fn resolve_config_from_file_config<FEnv, FRead>(
    parsed: FileConfig,
    key_override: Option<String>,
    env_lookup: FEnv,
    read_file: FRead,
) -> Result<Config, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
    FRead: Fn(&str) -> Result<String, ConfigError>,
{
    let api_key = resolve_api_key(&parsed.api, key_override, env_lookup, read_file)?;
    let base_url =
        normalized_string(&parsed.api.base_url).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let retry = match parsed.retry {
        Some(retry) => resolve_retry(retry)?,
        None => None,
    };

    Ok(Config {
        api: ApiConfig {
            base_url,
            api_key,
            sensor: parsed.api.sensor,
            language: normalized_option(&parsed.api.language),
        },
        network: parsed.network,
        retry,
    })
}

/// Turn `[retry]` into a policy. `max = 0` disables retries; an omitted
/// `status` means `INVALID_REQUEST`.
pub(super) fn resolve_retry(retry: FileRetryConfig) -> Result<Option<RetryOptions>, ConfigError> {
    if retry.max == 0 {
        return Ok(None);
    }
    let mut statuses = retry.status.into_vec().into_iter();
    let Some(first) = statuses.next() else {
        return Err(ConfigError::Invalid(
            "retry.status must name at least one status when retry.max > 0".to_string(),
        ));
    };

    let delay = parse_seconds("retry.delay_secs", retry.delay_secs)?;
    let mut options = statuses.try_fold(RetryOptions::new(retry.max, first, delay)?, |options, status| {
        options.also_on(status)
    })?;
    if let Some(timeout) = retry.timeout_secs {
        options = options.with_timeout(parse_seconds("retry.timeout_secs", timeout)?)?;
    }
    Ok(Some(options))
}

/// Parse non-negative fractional seconds.
pub fn parse_seconds(field: &str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| {
        ConfigError::Invalid(format!(
            "{field} must be a non-negative number of seconds (got {value})"
        ))
    })
}

fn resolve_api_key<FEnv, FRead>(
    api: &FileApiConfig,
    key_override: Option<String>,
    env_lookup: FEnv,
    read_file: FRead,
) -> Result<String, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
    FRead: Fn(&str) -> Result<String, ConfigError>,
{
    validate_api_key_sources(api)?;

    if let Some(key) = key_override {
        return Ok(key.trim().to_string());
    }

    if let Some(env_name) = normalized_option(&api.api_key_env) {
        return Ok(env_lookup(&env_name).unwrap_or_default().trim().to_string());
    }

    if let Some(path) = normalized_option(&api.api_key_file) {
        return Ok(read_file(&path)?.trim_end().to_string());
    }

    Ok(api.api_key.trim().to_string())
}

fn validate_api_key_sources(api: &FileApiConfig) -> Result<(), ConfigError> {
    let mut configured = Vec::new();
    if normalized_string(&api.api_key).is_some() {
        configured.push("api_key");
    }
    if normalized_option(&api.api_key_env).is_some() {
        configured.push("api_key_env");
    }
    if normalized_option(&api.api_key_file).is_some() {
        configured.push("api_key_file");
    }
    if configured.len() > 1 {
        return Err(ConfigError::Invalid(format!(
            "only one of api.api_key, api.api_key_env, and api.api_key_file may be set (found: {})",
            configured.join(", ")
        )));
    }
    Ok(())
}

pub(super) fn normalized_option(value: &Option<String>) -> Option<String> {
    value.as_deref().and_then(normalized_string)
}

pub(super) fn normalized_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
