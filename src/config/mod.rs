//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`CHATLINE_ENDPOINT`, `CHATLINE_API_KEY`,
//!    `CHATLINE_SERVICE`, `CHATLINE_TIMEOUT_SECS`)
//! 2. TOML file specified via `--config`
//! 3. `./chatline.toml` in the current directory
//! 4. `$XDG_CONFIG_HOME/chatline/chatline.toml` (or the platform config dir)
//! 5. Built-in defaults

mod defaults;
mod env;
mod loader;
mod resolve;
mod sources;
mod types;

pub use env::{ENV_API_KEY, ENV_ENDPOINT, ENV_SERVICE, ENV_TIMEOUT_SECS};
pub use loader::{load_config, load_config_with_source};
pub use sources::config_root_dir;
pub use types::{
    Config, ConfigSource, DisplayConfig, EditorConfig, LoadedConfig, LoggingConfig,
    NetworkConfig, RelayTarget, ServiceConfig,
};
use types::FileConfig;
