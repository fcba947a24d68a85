//! Environment overrides.

use crate::error::ConfigError;

use super::Config;

pub const ENV_ENDPOINT: &str = "CHATLINE_ENDPOINT";
pub const ENV_API_KEY: &str = "CHATLINE_API_KEY";
pub const ENV_SERVICE: &str = "CHATLINE_SERVICE";
pub const ENV_TIMEOUT_SECS: &str = "CHATLINE_TIMEOUT_SECS";

/// Apply `CHATLINE_*` variables on top of file values.
pub(super) fn apply_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(service) = non_empty(env_lookup, ENV_SERVICE) {
        config.service = Some(service);
    }
    if let Some(endpoint) = non_empty(env_lookup, ENV_ENDPOINT) {
        config.endpoint_override = Some(endpoint);
    }
    if let Some(key) = non_empty(env_lookup, ENV_API_KEY) {
        config.api_key_override = Some(key);
    }
    if let Some(timeout) = non_empty(env_lookup, ENV_TIMEOUT_SECS) {
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_TIMEOUT_SECS} value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        config.network.timeout_secs = parsed.max(1);
    }
    Ok(())
}

/// Look up `name`, treating blank values as unset.
pub(super) fn non_empty<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
