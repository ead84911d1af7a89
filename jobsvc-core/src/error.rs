//! Validation errors for caller-supplied input

use thiserror::Error;

use crate::domain::job_id::MAX_JOB_ID_LEN;

/// Reasons a job request is rejected before any HTTP call is made
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The job identifier argument was empty
    #[error("the job identifier argument is empty")]
    EmptyJobId,

    /// The sanitized job identifier exceeds what the Job Service accepts
    #[error("the job identifier is too long ({len} characters, maximum is {max})", max = MAX_JOB_ID_LEN)]
    JobIdTooLong {
        /// Length of the sanitized identifier, in characters
        len: usize,
    },

    /// The job definition source could not be read
    #[error("error reading job definition from {source_name}: {error}")]
    Unreadable {
        /// File name, or "standard input"
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    /// The job definition is not well-formed JSON
    #[error("the job definition provided is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The job web service URL argument was empty
    #[error("the job web service url argument is empty")]
    EmptyUrl,

    /// The polling interval was zero
    #[error("the polling interval must be greater than 0")]
    ZeroPollingInterval,
}
