//! Unified error types for the assistant.

use std::fmt;
use std::io;

// ---------------------------------------------------------------------------
// InputError
// ---------------------------------------------------------------------------

/// Errors raised by the raw-terminal input engine.
///
/// Cancellation is not an error: it is reported through the read outcome.
#[derive(Debug)]
pub enum InputError {
    /// stdin/stderr is not a terminal, or raw mode could not be enabled.
    NoTerminal,
    /// Reading input bytes or writing the editor surface failed.
    Io(io::Error),
    /// A menu was requested with no options to choose from.
    EmptyMenu,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTerminal => write!(f, "no interactive terminal"),
            Self::Io(e) => write!(f, "terminal io: {e}"),
            Self::EmptyMenu => write!(f, "menu has no options"),
        }
    }
}

impl std::error::Error for InputError {}

impl From<io::Error> for InputError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// RelayError
// ---------------------------------------------------------------------------

/// Errors from the remote relay service.
#[derive(Debug)]
pub enum RelayError {
    /// Network / reqwest-level error (including timeouts).
    Http(reqwest::Error),
    /// Non-2xx status from the service.
    Status(u16, String),
    /// The service answered with a body we could not read a reply from.
    InvalidResponse(String),
}

impl RelayError {
    /// True when the request gave up waiting on the service.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(inner) if inner.is_timeout())
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status(code, body) => write!(f, "status {code}: {body}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for RelayError {}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// AppError: top-level
// ---------------------------------------------------------------------------

/// Top-level error type for the command-line front end.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Input(InputError),
    Relay(RelayError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Relay(e) => write!(f, "relay: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        Self::Relay(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_display() {
        assert_eq!(InputError::NoTerminal.to_string(), "no interactive terminal");
        assert_eq!(InputError::EmptyMenu.to_string(), "menu has no options");
    }

    #[test]
    fn input_error_from_io() {
        let e = InputError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        let s = e.to_string();
        assert!(s.starts_with("terminal io:"), "got: {s}");
        assert!(s.contains("pipe closed"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn config_error_invalid_message() {
        let e = ConfigError::Invalid("unknown service `nope`".into());
        assert_eq!(e.to_string(), "invalid config: unknown service `nope`");
    }

    #[test]
    fn relay_status_is_not_a_timeout() {
        let e = RelayError::Status(502, "bad gateway".into());
        assert!(!e.is_timeout());
        assert_eq!(e.to_string(), "status 502: bad gateway");
    }

    #[test]
    fn app_error_wraps_each_layer() {
        assert!(AppError::from(InputError::NoTerminal)
            .to_string()
            .starts_with("input:"));
        assert!(AppError::from(ConfigError::Invalid("x".into()))
            .to_string()
            .starts_with("config:"));
        assert!(AppError::from(RelayError::InvalidResponse("empty".into()))
            .to_string()
            .starts_with("relay:"));
    }
}
