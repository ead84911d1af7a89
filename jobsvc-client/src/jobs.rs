//! Job-related API endpoints

use jobsvc_core::{Job, JobDefinition, JobId};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

use crate::error::Result;
use crate::{JOBS_ENDPOINT, JobServiceClient};

const APPLICATION_JSON: &str = "application/json";

impl JobServiceClient {
    /// URI of a single job resource
    pub fn job_url(&self, job_id: &JobId) -> String {
        format!("{}{}/{}", self.base_url, JOBS_ENDPOINT, job_id)
    }

    /// Create a job from a definition
    ///
    /// Issues `PUT {base}/job-service/v1/jobs/{jobId}` with the canonical JSON
    /// definition as body. Any 2xx status is success.
    pub async fn create_job(&self, job_id: &JobId, definition: &JobDefinition) -> Result<()> {
        let url = self.job_url(job_id);
        debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(ACCEPT, APPLICATION_JSON)
            .body(definition.to_canonical_string().to_owned())
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Get a job's metadata, including its status
    ///
    /// Issues `GET {base}/job-service/v1/jobs/{jobId}`.
    pub async fn get_job(&self, job_id: &JobId) -> Result<Job> {
        let url = self.job_url(job_id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, APPLICATION_JSON)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
