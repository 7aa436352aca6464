//! Sonar HTTP Client
//!
//! A small, type-safe HTTP client for the analysis service endpoints the
//! poller depends on: the background task status and the project quality
//! gate status.
//!
//! # Example
//!
//! ```no_run
//! use sonar_client::SonarClient;
//!
//! # async fn example() -> sonar_client::Result<()> {
//! let client = SonarClient::builder("https://sonar.example.com")
//!     .accept_invalid_certs(true)
//!     .build()?;
//!
//! let status = client.project_status("com.example:myapp").await?;
//! println!("Quality gate: {}", status);
//! # Ok(())
//! # }
//! ```

pub mod error;
mod quality_gates;
mod tasks;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use sonar_core::domain::credentials::Credentials;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the analysis service API
#[derive(Debug, Clone)]
pub struct SonarClient {
    /// Base URL of the service, including any context path
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Optional basic authentication applied to every request
    credentials: Option<Credentials>,
}

impl SonarClient {
    /// Create a new client with default HTTP settings
    ///
    /// # Arguments
    /// * `base_url` - e.g. "https://sonar.example.com"; trailing slashes are stripped
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client around a preconfigured reqwest `Client`
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials: None,
        }
    }

    /// Start building a client with custom TLS, timeout and authentication settings
    pub fn builder(base_url: impl Into<String>) -> SonarClientBuilder {
        SonarClientBuilder::new(base_url)
    }

    /// Attach basic authentication credentials
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET request with authentication applied
    fn get(&self, url: &str) -> RequestBuilder {
        debug!(url, "GET");
        let request = self.client.get(url);
        match &self.credentials {
            Some(creds) => request.basic_auth(&creds.username, creds.password.as_ref()),
            None => request,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    ///
    /// Bodies missing an expected field surface as `ParseError`.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Builder for [`SonarClient`]
#[derive(Debug, Clone)]
pub struct SonarClientBuilder {
    base_url: String,
    credentials: Option<Credentials>,
    accept_invalid_certs: bool,
    request_timeout: Option<Duration>,
}

impl SonarClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: None,
            accept_invalid_certs: false,
            request_timeout: None,
        }
    }

    /// Basic authentication for every request
    pub fn credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Skip TLS certificate verification (self-signed or internal instances)
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Upper bound for a single request, connect to last body byte
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<SonarClient> {
        let mut builder = Client::builder()
            .user_agent(concat!("sonar-poller/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(self.accept_invalid_certs);

        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))?;

        Ok(SonarClient::with_client(self.base_url, client).with_credentials(self.credentials))
    }
}
