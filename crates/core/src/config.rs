// Portal client configuration loaded from environment variables.
// Decision: PORTAL_ prefix for every variable
// Decision: Default to the local development API when nothing is set

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{PortalError, Result};
use crate::storage::FileStorage;

pub const DEFAULT_API_URL: &str = "http://localhost:2008";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Base URL of the portal REST API
    pub api_url: String,
    /// File holding the persisted session
    pub session_file: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: FileStorage::default_path(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("PORTAL_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let session_file = lookup("PORTAL_SESSION_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(FileStorage::default_path);

        let request_timeout = lookup("PORTAL_REQUEST_TIMEOUT")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Self {
            api_url,
            session_file,
            request_timeout,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(PortalError::config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(PortalError::config("request timeout must be positive"));
        }
        Ok(())
    }
}
