//! Shared state handed to every command

use crate::config::{Resource, Settings, ENV_ACCESS_TOKEN};
use crate::error::Result;
use crate::http::HttpClient;
use tracing::warn;

/// Everything a command needs besides its options
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    settings: Settings,
}

impl CommandContext {
    /// Create a context from resolved settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// The resolved settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// An HTTP client configured for one resource
    pub fn client(&self, resource: Resource) -> Result<HttpClient> {
        let auth = self.settings.auth(resource);
        if !auth.is_authenticated() {
            warn!(
                "No access token for {resource}, sending unauthenticated requests (set {} or {})",
                resource.token_env(),
                ENV_ACCESS_TOKEN
            );
        }
        HttpClient::with_auth(self.settings.http_config(resource), auth)
    }
}
