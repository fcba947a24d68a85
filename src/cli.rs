//! CLI argument parsing via clap.

use chatline::build_info;
use clap::Parser;
use std::path::PathBuf;

/// Terminal chat front end with a multi-line raw-mode editor.
#[derive(Debug, Parser)]
#[command(name = "chatline", version, long_version = build_info::LONG_VERSION)]
pub struct Args {
    /// Message to send. If provided, runs in one-shot mode and exits.
    pub prompt: Option<String>,

    /// Path to config file (default: ./chatline.toml or ~/.config/chatline/chatline.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Service to talk to, by name under `[services]`.
    #[arg(short = 's', long = "service")]
    pub service: Option<String>,

    /// Override the relay endpoint URL.
    #[arg(long = "endpoint")]
    pub endpoint: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}
