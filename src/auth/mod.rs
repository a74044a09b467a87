//! Authentication module
//!
//! Tokens are taken as given (from the settings file or the environment);
//! acquiring and refreshing them is left to whatever signed the user in.

use reqwest::RequestBuilder;

/// Authentication applied to outgoing requests
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// Bearer token authentication
    Bearer {
        /// The access token
        token: String,
    },
}

impl AuthConfig {
    /// Bearer auth from an optional token, `None` when absent or blank
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            Some(token) if !token.is_empty() => Self::Bearer {
                token: token.to_string(),
            },
            _ => Self::None,
        }
    }

    /// Whether requests will carry credentials
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Bearer { .. })
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            Self::None => req,
            Self::Bearer { token } => req.bearer_auth(token),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}
