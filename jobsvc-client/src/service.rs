//! Job Service abstraction
//!
//! The caller's submit and poll stages depend on this trait rather than on
//! the HTTP client directly, so they can be driven by a scripted service in tests.

use async_trait::async_trait;
use jobsvc_core::{Job, JobDefinition, JobId};

use crate::JobServiceClient;
use crate::error::Result;

/// Operations the caller needs from the Job Service
#[async_trait]
pub trait JobService: Send + Sync {
    /// Create (or replace) the job with the given identifier
    async fn create_job(&self, job_id: &JobId, definition: &JobDefinition) -> Result<()>;

    /// Fetch the current job metadata, including its status
    async fn get_job(&self, job_id: &JobId) -> Result<Job>;
}

#[async_trait]
impl JobService for JobServiceClient {
    async fn create_job(&self, job_id: &JobId, definition: &JobDefinition) -> Result<()> {
        JobServiceClient::create_job(self, job_id, definition).await
    }

    async fn get_job(&self, job_id: &JobId) -> Result<Job> {
        JobServiceClient::get_job(self, job_id).await
    }
}
