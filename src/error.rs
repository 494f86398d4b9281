use std::io;
use thiserror::Error;

/// Custom error type for the Pulse Vital client
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server returned status {status}")]
    Server { status: u16 },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not parse sensor response: {0}")]
    Parse(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the Pulse Vital client
pub type Result<T> = std::result::Result<T, PulseError>;

impl PulseError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PulseError::Config(msg.into())
    }

    /// Create a server error carrying the HTTP status code
    pub fn server(status: u16) -> Self {
        PulseError::Server { status }
    }

    pub fn parse<S: Into<String>>(msg: S) -> Self {
        PulseError::Parse(msg.into())
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        PulseError::InvalidArgument(msg.into())
    }

    pub fn storage<S: Into<String>>(msg: S) -> Self {
        PulseError::Storage(msg.into())
    }

    pub fn auth<S: Into<String>>(msg: S) -> Self {
        PulseError::Auth(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PulseError::Other(msg.into())
    }

    /// Status code when the failure came from a non-success HTTP response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PulseError::Server { status } => Some(*status),
            _ => None,
        }
    }
}
