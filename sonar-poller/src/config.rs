//! Poller configuration
//!
//! Settings are resolved by the command line layer (flags, environment,
//! prompts) and validated here before any polling starts.

use std::path::PathBuf;
use std::time::Duration;

use sonar_client::{ClientError, Credentials, SonarClient};
use thiserror::Error;

use crate::report::DEFAULT_REPORT_PATH;
use crate::retry::{BackoffPolicy, DEFAULT_MAX_ELAPSED};

/// Default bound for a single HTTP request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("server URL cannot be empty")]
    EmptyServerUrl,

    #[error("server URL must start with http:// or https://, got {0}")]
    InvalidServerUrl(String),

    #[error("project key cannot be empty")]
    EmptyProjectKey,

    #[error("timeout must be greater than 0")]
    ZeroTimeout,

    #[error("request timeout must be greater than 0")]
    ZeroRequestTimeout,
}

/// Everything a polling run needs
#[derive(Debug, Clone)]
pub struct PollerSettings {
    /// Service base URL including any context path, without trailing slash
    pub server_url: String,

    /// Project key as shown on the dashboard, e.g. `com.example:myapp`
    pub project_key: String,

    pub credentials: Option<Credentials>,

    /// Report artifact written by the scanner
    pub report_path: PathBuf,

    /// Budget of each polling loop
    pub timeout: Duration,

    pub request_timeout: Duration,

    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

impl PollerSettings {
    /// Settings with defaults for everything but the server and project
    pub fn new(server_url: impl Into<String>, project_key: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            project_key: project_key.into(),
            credentials: None,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            timeout: DEFAULT_MAX_ELAPSED,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.is_empty() {
            return Err(ConfigError::EmptyServerUrl);
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(ConfigError::InvalidServerUrl(self.server_url.clone()));
        }

        if self.project_key.trim().is_empty() {
            return Err(ConfigError::EmptyProjectKey);
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroRequestTimeout);
        }

        Ok(())
    }

    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::new(self.timeout)
    }

    /// HTTP client carrying the credentials and TLS settings
    pub fn build_client(&self) -> Result<SonarClient, ClientError> {
        SonarClient::builder(&self.server_url)
            .credentials(self.credentials.clone())
            .accept_invalid_certs(self.accept_invalid_certs)
            .request_timeout(self.request_timeout)
            .build()
    }
}
