//! Configuration module
//!
//! Connection and polling settings for a single `create-job` run.

use std::time::Duration;

use jobsvc_core::ValidationError;

/// Seconds between status checks when no interval is given
pub const DEFAULT_POLLING_INTERVAL_SECS: u64 = 30;

/// Caller configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Job Service
    pub url: String,

    /// Opaque caller token; logged, never sent to the service
    pub correlation_id: String,

    /// How long to sleep between status checks
    pub polling_interval: Duration,

    /// Give up polling after this long. `None` polls until a terminal status.
    pub poll_timeout: Option<Duration>,

    /// Per-request HTTP timeout. `None` keeps the HTTP client default.
    pub http_timeout: Option<Duration>,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            correlation_id: String::new(),
            polling_interval: Duration::from_secs(DEFAULT_POLLING_INTERVAL_SECS),
            poll_timeout: None,
            http_timeout: None,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }

        if self.polling_interval.is_zero() {
            return Err(ValidationError::ZeroPollingInterval);
        }

        Ok(())
    }

    /// Build the HTTP client used for every Job Service call
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.http_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}
