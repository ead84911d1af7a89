//! Job domain types
//!
//! The status document returned by `GET /job-service/v1/jobs/{id}`.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Job metadata as reported by the Job Service
///
/// Only `status` is required; the remaining fields are used for log detail
/// when the service provides them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub status: JobStatus,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub percentage_complete: Option<f32>,
    #[serde(default)]
    pub failures: Vec<Failure>,
}

/// A failure recorded against a job
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    #[serde(default)]
    pub failure_id: Option<String>,
    /// Representation depends on the service's date serialization
    #[serde(default)]
    pub failure_time: Option<Value>,
    #[serde(default)]
    pub failure_source: Option<String>,
    #[serde(default)]
    pub failure_message: Option<String>,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.failure_source.as_deref().unwrap_or("unknown source"),
            self.failure_message.as_deref().unwrap_or("no message")
        )?;

        if let Some(id) = &self.failure_id {
            write!(f, " (failure {})", id)?;
        }

        match &self.failure_time {
            Some(Value::String(time)) => write!(f, " at {}", time),
            Some(Value::Null) | None => Ok(()),
            Some(time) => write!(f, " at {}", time),
        }
    }
}

/// Job status
///
/// The service's vocabulary is open-ended; any unrecognized string is kept as
/// [`JobStatus::Other`] and treated as still active. A `status` that is not a
/// string at all is kept the same way, as its JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Active,
    Paused,
    Waiting,
    Completed,
    Cancelled,
    Failed,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Active => "Active",
            JobStatus::Paused => "Paused",
            JobStatus::Waiting => "Waiting",
            JobStatus::Completed => "Completed",
            JobStatus::Cancelled => "Cancelled",
            JobStatus::Failed => "Failed",
            JobStatus::Other(s) => s.as_str(),
        }
    }

    /// Whether polling should stop at this status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Cancelled | JobStatus::Failed
        )
    }

    /// Terminal statuses the caller reports as success
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Active" => JobStatus::Active,
            "Paused" => JobStatus::Paused,
            "Waiting" => JobStatus::Waiting,
            "Completed" => JobStatus::Completed,
            "Cancelled" => JobStatus::Cancelled,
            "Failed" => JobStatus::Failed,
            _ => JobStatus::Other(s),
        }
    }
}

impl From<Value> for JobStatus {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => JobStatus::from(s),
            other => JobStatus::Other(other.to_string()),
        }
    }
}

// A missing `status` key still fails: `Value` does not accept an absent field.
impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(JobStatus::from)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
