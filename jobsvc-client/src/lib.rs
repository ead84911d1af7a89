//! Job Service HTTP Client
//!
//! A small, type-safe HTTP client for the Job Service REST API
//! (`/job-service/v1/jobs/{jobId}`).
//!
//! # Example
//!
//! ```no_run
//! use jobsvc_client::JobServiceClient;
//! use jobsvc_core::{JobDefinition, JobId};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = JobServiceClient::new("http://localhost:8080");
//! let job_id = JobId::parse("nightly:export")?;
//! let definition = JobDefinition::from_json(r#"{"name": "export"}"#)?;
//!
//! client.create_job(&job_id, &definition).await?;
//! let job = client.get_job(&job_id).await?;
//! println!("{} is {}", job_id, job.status);
//! # Ok(())
//! # }
//! ```

pub mod error;
mod jobs;
mod service;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use service::JobService;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// Path of the jobs collection, relative to the service base URL
pub const JOBS_ENDPOINT: &str = "/job-service/v1/jobs";

/// HTTP client for the Job Service API
#[derive(Debug, Clone)]
pub struct JobServiceClient {
    /// Base URL of the Job Service (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl JobServiceClient {
    /// Create a new Job Service client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Job Service (e.g., "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new Job Service client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, etc.
    ///
    /// # Example
    /// ```
    /// use jobsvc_client::JobServiceClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = JobServiceClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the Job Service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize a JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code of a response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        self.check_status(response).await.map(|_| ())
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }
}

