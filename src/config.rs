//! Settings for the CLI
//!
//! Settings are resolved in three layers: built-in defaults, an optional YAML
//! file, then environment variables. Every field of the file is optional.
//!
//! ```yaml
//! endpoints:
//!   flow: https://management.azure.com
//!   yammer: https://www.yammer.com/api
//! auth:
//!   yammer_token: eyJ0eXAi...
//! http:
//!   timeout_secs: 60
//!   rate_limit:
//!     yammer: { requests_per_second: 1, burst_size: 10 }
//! pagination:
//!   max_pages: 200
//! ```

use crate::auth::AuthConfig;
use crate::error::{Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::DEFAULT_MAX_PAGES;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default Flow management endpoint
pub const DEFAULT_FLOW_ENDPOINT: &str = "https://management.azure.com";

/// Default Yammer REST endpoint
pub const DEFAULT_YAMMER_ENDPOINT: &str = "https://www.yammer.com/api";

/// Environment variable holding a token used for every resource
pub const ENV_ACCESS_TOKEN: &str = "O365_ACCESS_TOKEN";

/// Environment variable naming the settings file
pub const ENV_CONFIG: &str = "O365_CONFIG";

// ============================================================================
// Resources
// ============================================================================

/// A remote service the CLI talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Microsoft Flow (Power Automate) management API
    Flow,
    /// Yammer REST API
    Yammer,
}

impl Resource {
    /// Environment variable overriding this resource's token
    pub fn token_env(self) -> &'static str {
        match self {
            Resource::Flow => "O365_FLOW_TOKEN",
            Resource::Yammer => "O365_YAMMER_TOKEN",
        }
    }

    /// Environment variable overriding this resource's endpoint
    pub fn endpoint_env(self) -> &'static str {
        match self {
            Resource::Flow => "O365_FLOW_ENDPOINT",
            Resource::Yammer => "O365_YAMMER_ENDPOINT",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Flow => f.write_str("Microsoft Flow"),
            Resource::Yammer => f.write_str("Yammer"),
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Complete CLI settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Service base URLs
    pub endpoints: Endpoints,

    /// Access tokens
    pub auth: AuthSettings,

    /// HTTP client settings
    pub http: HttpSettings,

    /// Pagination settings
    pub pagination: PaginationSettings,
}

/// Service base URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub flow: String,
    pub yammer: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            flow: DEFAULT_FLOW_ENDPOINT.to_string(),
            yammer: DEFAULT_YAMMER_ENDPOINT.to_string(),
        }
    }
}

/// Access tokens per resource
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub flow_token: Option<String>,
    pub yammer_token: Option<String>,
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("flow_token", &self.flow_token.as_ref().map(|_| "<redacted>"))
            .field(
                "yammer_token",
                &self.yammer_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent override
    pub user_agent: Option<String>,

    /// Client-side rate limits per resource
    pub rate_limit: RateLimits,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: None,
            rate_limit: RateLimits::default(),
        }
    }
}

/// Client-side rate limits per resource, `null` disables limiting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimits {
    pub flow: Option<RateLimiterConfig>,
    pub yammer: Option<RateLimiterConfig>,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            flow: None,
            yammer: Some(RateLimiterConfig::yammer()),
        }
    }
}

/// Pagination settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
    /// Upper bound on pages requested by one list command
    pub max_pages: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl Settings {
    /// Parse settings from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Defaults, then the file (if any), then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(ENV_ACCESS_TOKEN) {
            self.auth.flow_token = Some(token.clone());
            self.auth.yammer_token = Some(token);
        }
        if let Some(token) = get(Resource::Flow.token_env()) {
            self.auth.flow_token = Some(token);
        }
        if let Some(token) = get(Resource::Yammer.token_env()) {
            self.auth.yammer_token = Some(token);
        }
        if let Some(endpoint) = get(Resource::Flow.endpoint_env()) {
            self.endpoints.flow = endpoint;
        }
        if let Some(endpoint) = get(Resource::Yammer.endpoint_env()) {
            self.endpoints.yammer = endpoint;
        }
    }

    /// Base URL of a resource
    pub fn endpoint(&self, resource: Resource) -> &str {
        match resource {
            Resource::Flow => &self.endpoints.flow,
            Resource::Yammer => &self.endpoints.yammer,
        }
    }

    /// Authentication for a resource
    pub fn auth(&self, resource: Resource) -> AuthConfig {
        let token = match resource {
            Resource::Flow => self.auth.flow_token.as_deref(),
            Resource::Yammer => self.auth.yammer_token.as_deref(),
        };
        AuthConfig::from_token(token)
    }

    /// HTTP client configuration for a resource
    pub fn http_config(&self, resource: Resource) -> HttpClientConfig {
        let rate_limit = match resource {
            Resource::Flow => self.http.rate_limit.flow,
            Resource::Yammer => self.http.rate_limit.yammer,
        };

        let mut builder = HttpClientConfig::builder()
            .base_url(self.endpoint(resource))
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .rate_limit(rate_limit);

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent);
        }

        builder.build()
    }
}
