//! Default configuration constants.

use std::collections::BTreeMap;

use super::ServiceConfig;

/// Service used when the config file defines none.
pub(super) const DEFAULT_SERVICE_NAME: &str = "local";
pub(super) const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/chat";
pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub(super) const DEFAULT_RETRIES: u32 = 1;
pub(super) const DEFAULT_PROMPT: &str = crate::tui::settings::PROMPT_PRIMARY;
pub(super) const DEFAULT_CONTINUATION_PROMPT: &str = crate::tui::settings::PROMPT_CONTINUATION;
pub(super) const DEFAULT_ESCAPE_TIMEOUT_MS: u64 = crate::tui::settings::ESCAPE_TIMEOUT_MS;
pub(super) const DEFAULT_LOG_LEVEL: &str = "warn";

pub(super) const MAX_ESCAPE_TIMEOUT_MS: u64 = 1000;
pub(super) const MAX_RETRIES: u32 = 10;

pub(super) fn default_services_map() -> BTreeMap<String, ServiceConfig> {
    let mut services = BTreeMap::new();
    services.insert(
        DEFAULT_SERVICE_NAME.to_string(),
        ServiceConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            api_key_env: None,
            description: "chat relay on localhost".to_string(),
        },
    );
    services
}
