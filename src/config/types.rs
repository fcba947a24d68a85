//! Configuration data model.
//!
//! Struct definitions and their defaults only. Loading, precedence and
//! validation live in the sibling modules.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_CONTINUATION_PROMPT, DEFAULT_ESCAPE_TIMEOUT_MS, DEFAULT_LOG_LEVEL, DEFAULT_PROMPT,
    DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Relay services keyed by name, from `[services.<name>]`.
    pub services: BTreeMap<String, ServiceConfig>,
    /// Active service name. `None` until chosen when several are configured.
    pub service: Option<String>,
    pub network: NetworkConfig,
    pub display: DisplayConfig,
    pub editor: EditorConfig,
    pub logging: LoggingConfig,
    /// Endpoint forced by `CHATLINE_ENDPOINT` or `--endpoint`.
    pub endpoint_override: Option<String>,
    /// Key forced by `CHATLINE_API_KEY`.
    pub api_key_override: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            services: super::defaults::default_services_map(),
            service: None,
            network: NetworkConfig::default(),
            display: DisplayConfig::default(),
            editor: EditorConfig::default(),
            logging: LoggingConfig::default(),
            endpoint_override: None,
            api_key_override: None,
        }
    }
}

/// One relay destination under `[services.<name>]`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub api_key: String,
    /// Env var consulted when `api_key` is empty.
    pub api_key_env: Option<String>,
    /// Shown next to the name in the service menu.
    pub description: String,
}

/// Where and how to send messages, once a service is settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayTarget {
    pub service: String,
    pub endpoint: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    pub timeout_secs: u64,
    /// Extra attempts after a timed-out request.
    pub retries: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
    /// Lay replies out as markdown.
    pub markdown: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            markdown: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    pub prompt: String,
    pub continuation_prompt: String,
    pub escape_timeout_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.into(),
            continuation_prompt: DEFAULT_CONTINUATION_PROMPT.into(),
            escape_timeout_ms: DEFAULT_ESCAPE_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `CHATLINE_LOG` is unset.
    pub level: String,
    /// Log file path; defaults to the user cache dir.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.into(),
            file: None,
        }
    }
}

/// Raw TOML shape before defaults, env and validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileConfig {
    pub(super) services: BTreeMap<String, ServiceConfig>,
    pub(super) service: Option<String>,
    pub(super) network: NetworkConfig,
    pub(super) display: DisplayConfig,
    pub(super) editor: EditorConfig,
    pub(super) logging: LoggingConfig,
}

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config <path>`.
    Explicit(PathBuf),
    /// `./chatline.toml`.
    Local,
    /// `<config dir>/chatline/chatline.toml`.
    Global(PathBuf),
    BuiltInDefaults,
}

/// Configuration plus the source it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}
