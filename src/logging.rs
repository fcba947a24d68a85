//! File-based tracing setup.
//!
//! stderr belongs to the line editor, so log output goes to a file.

use crate::config::LoggingConfig;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Env var holding a filter directive that beats `logging.level`.
pub const LOG_ENV: &str = "CHATLINE_LOG";

const LOG_FILE_NAME: &str = "chatline.log";

/// Install the global subscriber and return the log file path.
///
/// Failures are swallowed: the program runs without logs rather than not
/// at all. Returns `None` when nothing was installed.
pub fn init_logging(config: &LoggingConfig) -> Option<PathBuf> {
    let path = log_path(config)?;
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config, std::env::var(LOG_ENV).ok().as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(path)
}

/// Configured path, or `<cache dir>/chatline/chatline.log`.
pub fn log_path(config: &LoggingConfig) -> Option<PathBuf> {
    config
        .file
        .clone()
        .or_else(|| dirs::cache_dir().map(|dir| dir.join("chatline").join(LOG_FILE_NAME)))
}

fn env_filter(config: &LoggingConfig, from_env: Option<&str>) -> EnvFilter {
    from_env
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(config.level.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
