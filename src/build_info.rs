//! Compile-time build metadata for the `--version` surface.

/// Package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit description captured by `build.rs`.
pub const GIT_COMMIT: &str = env!("CHATLINE_BUILD_GIT_HASH");

/// Build timestamp captured by `build.rs`.
pub const BUILD_TIMESTAMP: &str = env!("CHATLINE_BUILD_TIMESTAMP");

/// Long version text handed to clap (`chatline --version`).
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("CHATLINE_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("CHATLINE_BUILD_TIMESTAMP")
);

/// One-line banner shown when the interactive loop starts.
pub fn banner_line() -> String {
    format!("chatline v{VERSION} ({GIT_COMMIT})")
}
