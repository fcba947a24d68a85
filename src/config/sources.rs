//! Config-file discovery.
//!
//! Order: explicit path > `./chatline.toml` > global file > built-in defaults.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::ConfigSource;

pub(super) const CONFIG_FILE_NAME: &str = "chatline.toml";
pub(super) const CONFIG_DIR_NAME: &str = "chatline";

/// Read config text from the highest-precedence source that exists.
///
/// A missing explicit path is an error; missing implicit files are skipped.
pub(super) fn read_config_text<FRead, FRoot>(
    path_override: Option<&Path>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(path) = path_override {
        let text = read_file(path)?;
        return Ok((text, ConfigSource::Explicit(path.to_path_buf())));
    }

    if let Ok(text) = read_file(Path::new(CONFIG_FILE_NAME)) {
        return Ok((text, ConfigSource::Local));
    }

    if let Some(dir) = config_root() {
        let global = global_config_path(&dir);
        if let Ok(text) = read_file(&global) {
            return Ok((text, ConfigSource::Global(global)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}

pub(super) fn global_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// `$XDG_CONFIG_HOME` when set, otherwise the platform config dir.
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::config_dir()
}

impl ConfigSource {
    /// Path the config was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Global(path) => Some(path),
            Self::Local => Some(Path::new(CONFIG_FILE_NAME)),
            Self::BuiltInDefaults => None,
        }
    }
}
