//! Environment overrides.
//!
//! `PLACES_*` variables win over anything read from a config file.

use crate::error::ConfigError;

use super::Config;

/// Env var holding the API key.
pub(super) const API_KEY_ENV: &str = "PLACES_API_KEY";
const BASE_URL_ENV: &str = "PLACES_BASE_URL";
const TIMEOUT_ENV: &str = "PLACES_TIMEOUT_SECS";

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty(env_lookup, BASE_URL_ENV) {
        config.api.base_url = url;
    }
    if let Some(timeout) = non_empty(env_lookup, TIMEOUT_ENV) {
        // Clamp to at least 1 second to avoid "no-timeout" accidental behavior.
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {TIMEOUT_ENV} value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        config.network.timeout_secs = parsed.max(1);
    }
    Ok(())
}

/// Runtime API key override from the environment.
pub(super) fn api_key_override_with<FEnv>(env_lookup: &FEnv) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    non_empty(env_lookup, API_KEY_ENV)
}

fn non_empty<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
