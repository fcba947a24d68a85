//! File config to runtime config resolution and validation.

use crate::error::ConfigError;

use super::defaults::{default_services_map, MAX_ESCAPE_TIMEOUT_MS, MAX_RETRIES};
use super::env::non_empty;
use super::{Config, FileConfig, RelayTarget};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Fill defaults and resolve per-service keys from the environment.
pub(super) fn resolve_config_from_file_config<FEnv>(
    mut parsed: FileConfig,
    env_lookup: &FEnv,
) -> Config
where
    FEnv: Fn(&str) -> Option<String>,
{
    if parsed.services.is_empty() {
        parsed.services = default_services_map();
    }

    for service in parsed.services.values_mut() {
        service.endpoint = service.endpoint.trim().to_string();
        if service.api_key.trim().is_empty() {
            if let Some(var) = service.api_key_env.as_deref() {
                service.api_key = non_empty(env_lookup, var).unwrap_or_default();
            }
        }
    }

    let service = parsed
        .service
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    let mut config = Config {
        services: parsed.services,
        service,
        network: parsed.network,
        display: parsed.display,
        editor: parsed.editor,
        logging: parsed.logging,
        endpoint_override: None,
        api_key_override: None,
    };
    config.network.timeout_secs = config.network.timeout_secs.max(1);
    config
}

/// Reject values the rest of the program cannot work with.
pub(super) fn validate(config: &Config) -> Result<(), ConfigError> {
    let escape = config.editor.escape_timeout_ms;
    if !(1..=MAX_ESCAPE_TIMEOUT_MS).contains(&escape) {
        return Err(ConfigError::Invalid(format!(
            "editor.escape_timeout_ms must be between 1 and {MAX_ESCAPE_TIMEOUT_MS}, got {escape}"
        )));
    }
    if config.network.retries > MAX_RETRIES {
        return Err(ConfigError::Invalid(format!(
            "network.retries must be at most {MAX_RETRIES}, got {}",
            config.network.retries
        )));
    }
    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "logging.level `{}` is not one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        )));
    }
    for (name, service) in &config.services {
        check_endpoint(&format!("services.{name}.endpoint"), &service.endpoint)?;
    }
    if let Some(endpoint) = &config.endpoint_override {
        check_endpoint("endpoint override", endpoint)?;
    }
    if let Some(name) = &config.service {
        if !config.services.contains_key(name) {
            return Err(unknown_service(name));
        }
    }
    Ok(())
}

fn check_endpoint(key: &str, endpoint: &str) -> Result<(), ConfigError> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return Ok(());
    }
    Err(ConfigError::Invalid(format!(
        "{key} must be an http(s) URL, got `{endpoint}`"
    )))
}

fn unknown_service(name: &str) -> ConfigError {
    ConfigError::Invalid(format!("service `{name}` is not defined under [services]"))
}

impl Config {
    /// True when several services exist and none has been picked.
    pub fn needs_service_choice(&self) -> bool {
        self.service.is_none() && self.endpoint_override.is_none() && self.services.len() > 1
    }

    /// Make `name` the active service.
    pub fn select_service(&mut self, name: &str) -> Result<(), ConfigError> {
        if !self.services.contains_key(name) {
            return Err(unknown_service(name));
        }
        self.service = Some(name.to_string());
        Ok(())
    }

    /// Force the endpoint, as `--endpoint` does.
    pub fn override_endpoint(&mut self, endpoint: &str) -> Result<(), ConfigError> {
        check_endpoint("endpoint override", endpoint)?;
        self.endpoint_override = Some(endpoint.to_string());
        Ok(())
    }

    /// Resolve the destination for outgoing messages.
    ///
    /// The explicitly chosen service wins, then the only configured one.
    /// Overrides replace the endpoint and key of whichever is picked.
    pub fn relay_target(&self) -> Result<RelayTarget, ConfigError> {
        let picked = match &self.service {
            Some(name) => Some(
                self.services
                    .get_key_value(name)
                    .ok_or_else(|| unknown_service(name))?,
            ),
            None if self.services.len() == 1 => self.services.iter().next(),
            None => None,
        };

        let (name, endpoint, key) = match (picked, &self.endpoint_override) {
            (Some((name, service)), over) => (
                name.clone(),
                over.clone().unwrap_or_else(|| service.endpoint.clone()),
                Some(service.api_key.clone()),
            ),
            (None, Some(endpoint)) => ("custom".to_string(), endpoint.clone(), None),
            (None, None) => {
                return Err(ConfigError::Invalid(
                    "several services are configured; choose one with --service or `service`"
                        .to_string(),
                ))
            }
        };

        let api_key = self
            .api_key_override
            .clone()
            .or(key)
            .filter(|key| !key.trim().is_empty());
        Ok(RelayTarget {
            service: name,
            endpoint,
            api_key,
        })
    }
}
