//! Error types for o365-cli
//!
//! This module defines the error hierarchy for the entire CLI.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::http::{ErrorEnvelope, UpstreamFailure};
use thiserror::Error;

/// The main error type for o365-cli
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Command Errors
    // ============================================================================
    /// An option set rejected before any request was made
    #[error("{message}")]
    Validation { message: String },

    /// A remote failure after normalization; displays the bare message
    #[error("{message}")]
    Command { message: String },

    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// Raw failure from the transport, not yet normalized
    #[error("{0}")]
    Upstream(UpstreamFailure),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unexpected response shape: {message}")]
    Decode { message: String },

    #[error("Stopped after {max_pages} pages without reaching the end of the feed")]
    MaxPagesExceeded { max_pages: usize },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a normalized command error
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Collapse a raw upstream failure into a command error.
    ///
    /// Every other variant is returned untouched.
    pub fn normalize(self) -> Self {
        match self {
            Error::Upstream(failure) => {
                Error::command(ErrorEnvelope::from_failure(&failure).into_message())
            }
            other => other,
        }
    }

    /// HTTP status of an upstream failure, if there was a response at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Upstream(failure) => failure.status(),
            _ => None,
        }
    }
}

impl From<UpstreamFailure> for Error {
    fn from(failure: UpstreamFailure) -> Self {
        Error::Upstream(failure)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upstream(UpstreamFailure::Transport(error_chain(&err)))
    }
}

/// An error's message followed by each distinct cause, joined with `: `
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Result type alias for o365-cli
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
