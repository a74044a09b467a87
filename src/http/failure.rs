//! Upstream failures and their normalization
//!
//! The management APIs reject requests with several different body shapes:
//!
//! - `{"error": {"code": "...", "message": "..."}}` (Flow, Graph)
//! - `{"error": {"odata.error": {"code": "...", "message": {"value": "..."}}}}`
//!   and the unwrapped `{"odata.error": {...}}` (SharePoint style)
//! - anything else: a bare string, an HTML error page, a transport failure
//!
//! [`ErrorEnvelope`] classifies them so that exactly one message reaches the user.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// A request that did not succeed, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamFailure {
    /// The server answered with a non-success status
    Response {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },
    /// No response was received (DNS, connect, timeout, TLS)
    Transport(String),
}

impl UpstreamFailure {
    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

impl fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Response { status, body } => write!(f, "HTTP {status}: {body}"),
            Self::Transport(message) => f.write_str(message),
        }
    }
}

/// The shapes an upstream error can take, in resolution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorEnvelope {
    /// `error["odata.error"].message.value`
    OData {
        code: Option<String>,
        message: String,
    },
    /// `error.code` / `error.message`
    Structured {
        code: Option<String>,
        message: String,
    },
    /// Whatever was received, as text
    Plain(String),
}

impl ErrorEnvelope {
    /// Classify a raw response body
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(_) => Self::Plain(body.trim().to_string()),
        }
    }

    /// Classify an already decoded body
    pub fn from_value(value: &Value) -> Self {
        match RawBody::deserialize(value) {
            Ok(RawBody::Wrapped { error }) => error.into(),
            Ok(RawBody::ODataTopLevel { odata }) => odata.into(),
            Err(_) => match value {
                Value::String(text) => Self::Plain(text.clone()),
                other => Self::Plain(other.to_string()),
            },
        }
    }

    /// Classify any failure coming out of the HTTP layer
    pub fn from_failure(failure: &UpstreamFailure) -> Self {
        match failure {
            UpstreamFailure::Response { status, body } if body.trim().is_empty() => {
                Self::Plain(format!("Request failed with status code {status}"))
            }
            UpstreamFailure::Response { body, .. } => Self::parse(body),
            UpstreamFailure::Transport(message) => Self::Plain(message.clone()),
        }
    }

    /// Error code reported by the service, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::OData { code, .. } | Self::Structured { code, .. } => code.as_deref(),
            Self::Plain(_) => None,
        }
    }

    /// The user-facing message
    pub fn message(&self) -> &str {
        match self {
            Self::OData { message, .. } | Self::Structured { message, .. } => message,
            Self::Plain(message) => message,
        }
    }

    /// Consume the envelope, keeping only the message
    pub fn into_message(self) -> String {
        match self {
            Self::OData { message, .. } | Self::Structured { message, .. } => message,
            Self::Plain(message) => message,
        }
    }
}

// Wire shapes. Untagged variants are tried top to bottom, which encodes the
// resolution order: OData before structured before bare text.

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBody {
    Wrapped {
        error: RawError,
    },
    ODataTopLevel {
        #[serde(rename = "odata.error")]
        odata: RawOData,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawError {
    OData {
        #[serde(rename = "odata.error")]
        odata: RawOData,
    },
    Structured {
        #[serde(default)]
        code: Option<Value>,
        message: String,
    },
    Text(String),
}

#[derive(Deserialize)]
struct RawOData {
    #[serde(default)]
    code: Option<Value>,
    message: RawODataMessage,
}

#[derive(Deserialize)]
struct RawODataMessage {
    value: String,
}

impl From<RawError> for ErrorEnvelope {
    fn from(raw: RawError) -> Self {
        match raw {
            RawError::OData { odata } => odata.into(),
            RawError::Structured { code, message } => Self::Structured {
                code: code.as_ref().map(code_to_string),
                message,
            },
            RawError::Text(text) => Self::Plain(text),
        }
    }
}

impl From<RawOData> for ErrorEnvelope {
    fn from(raw: RawOData) -> Self {
        Self::OData {
            code: raw.code.as_ref().map(code_to_string),
            message: raw.message.value,
        }
    }
}

fn code_to_string(code: &Value) -> String {
    match code {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
