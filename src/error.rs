//! Error types for cosvalue.

use std::fmt;
use thiserror::Error;

/// The main error type for cosvalue.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// History file errors
    #[error("History error: {0}")]
    History(String),

    /// Generic application error
    #[error("{0}")]
    Application(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new history error.
    pub fn history(msg: impl Into<String>) -> Self {
        Self::History(msg.into())
    }

    /// Create a new application error.
    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Why a snapshot lookup produced no snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The creature name was empty after trimming.
    InvalidName,
    /// Connection, TLS or body read failure.
    Transport,
    /// The server answered with a non-success status.
    HttpStatus(u16),
    /// The page loaded but carried none of the expected fields.
    MarkupMissing,
}

impl FetchErrorKind {
    /// Short label shown in the snapshot panel.
    pub fn label(&self) -> String {
        match self {
            Self::InvalidName => "Invalid creature name".to_string(),
            Self::Transport => "Error fetching data".to_string(),
            Self::HttpStatus(404) => "Creature not found (HTTP 404)".to_string(),
            Self::HttpStatus(code) => format!("Server returned HTTP {}", code),
            Self::MarkupMissing => "No value data on page".to_string(),
        }
    }

    /// Whether trying the same lookup again might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport => true,
            Self::HttpStatus(code) => *code >= 500 || *code == 429,
            Self::InvalidName | Self::MarkupMissing => false,
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A failed snapshot lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::InvalidName, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Transport, message)
    }

    pub fn status(code: u16, url: &str) -> Self {
        Self::new(FetchErrorKind::HttpStatus(code), url)
    }

    pub fn markup_missing(url: &str) -> Self {
        Self::new(FetchErrorKind::MarkupMissing, url)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::new(FetchErrorKind::HttpStatus(status.as_u16()), err.to_string()),
            None => Self::transport(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_kind_labels() {
        assert_eq!(FetchErrorKind::Transport.label(), "Error fetching data");
        assert_eq!(
            FetchErrorKind::HttpStatus(404).label(),
            "Creature not found (HTTP 404)"
        );
        assert_eq!(FetchErrorKind::HttpStatus(503).label(), "Server returned HTTP 503");
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(FetchErrorKind::Transport.is_retryable());
        assert!(FetchErrorKind::HttpStatus(503).is_retryable());
        assert!(FetchErrorKind::HttpStatus(429).is_retryable());
        assert!(!FetchErrorKind::HttpStatus(404).is_retryable());
        assert!(!FetchErrorKind::MarkupMissing.is_retryable());
        assert!(!FetchErrorKind::InvalidName.is_retryable());
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(Error::config("bad key").to_string(), "Configuration error: bad key");
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::status(500, "https://example.test/x");
        assert_eq!(err.to_string(), "Server returned HTTP 500: https://example.test/x");
    }
}
