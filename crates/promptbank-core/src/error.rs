//! Error types for promptbank.

use thiserror::Error;

/// Result type alias using promptbank's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for promptbank operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Network, HTTP status or decoding failure while talking to the store
    #[error("Transport error: {0}")]
    Transport(String),

    /// Well-formed envelope that reported `status: "error"`
    #[error("Remote error: {0}")]
    Remote(String),

    /// Required field left blank
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Clipboard write failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// File or process I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Transport(format!("Failed to parse response: {}", e))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}
