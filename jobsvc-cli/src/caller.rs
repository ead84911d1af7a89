//! Submit-then-poll control flow
//!
//! Creates the job once, then hands over to the [`Poller`]. Errors are
//! returned to `main`, which is the only place that picks an exit code.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use jobsvc_client::JobService;
use jobsvc_core::JobStatus;
use tracing::{debug, info};

use crate::poller::{PollReport, Poller};
use crate::request::JobRequest;

/// How the job ended, when polling reached a terminal status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
    Failed,
}

impl Outcome {
    fn from_status(status: &JobStatus) -> Self {
        match status {
            JobStatus::Completed => Outcome::Completed,
            JobStatus::Cancelled => Outcome::Cancelled,
            _ => Outcome::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed)
    }
}

/// Issue the create request; any non-2xx response is fatal
pub async fn submit(service: &dyn JobService, request: &JobRequest) -> Result<()> {
    info!("Calling Job Service to create job {} ...", request.job_id);
    debug!(
        "Job definition: {}",
        request.definition.to_canonical_string()
    );

    service
        .create_job(&request.job_id, &request.definition)
        .await
        .with_context(|| format!("Job creation has failed for job {}", request.job_id))?;

    info!("Job {} created", request.job_id);
    Ok(())
}

/// Create the job and wait for it to finish
pub async fn run(
    service: Arc<dyn JobService>,
    request: &JobRequest,
    stop: impl Future<Output = ()>,
) -> Result<(Outcome, PollReport)> {
    submit(service.as_ref(), request).await?;

    let report = Poller::new(service, request.config.polling_interval)
        .with_deadline(request.config.poll_timeout)
        .poll_until_terminal(&request.job_id, stop)
        .await
        .with_context(|| format!("Polling failed for job {}", request.job_id))?;

    let outcome = Outcome::from_status(&report.status);
    if outcome.is_success() {
        info!("Job creation completed.");
    } else {
        info!("Job creation failed ...");
    }

    Ok((outcome, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::poller::PollError;
    use jobsvc_client::{ClientError, JobServiceClient};
    use jobsvc_core::{JobDefinition, JobId};
    use serde_json::json;
    use std::future::pending;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const JOB_PATH: &str = "/job-service/v1/jobs/job_one_two";

    fn request(server: &MockServer) -> JobRequest {
        let mut config = Config::new(server.uri());
        config.polling_interval = Duration::from_millis(5);
        JobRequest {
            job_id: JobId::parse("job:one,two").unwrap(),
            definition: JobDefinition::from_json(r#"{"name": "e2e"}"#).unwrap(),
            config,
        }
    }

    fn service(server: &MockServer) -> Arc<dyn JobService> {
        Arc::new(JobServiceClient::new(server.uri()))
    }

    async fn count_requests(server: &MockServer, verb: &str) -> usize {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == verb)
            .count()
    }

    #[tokio::test]
    async fn test_put_failure_skips_polling() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(JOB_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let request = request(&mock_server);
        let err = run(service(&mock_server), &request, pending())
            .await
            .unwrap_err();

        let client_err = err.downcast_ref::<ClientError>().unwrap();
        assert_eq!(client_err.status(), Some(500));
        assert_eq!(count_requests(&mock_server, "GET").await, 0);
    }

    #[tokio::test]
    async fn test_active_twice_then_completed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(JOB_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        // First registered mock wins until exhausted
        Mock::given(method("GET"))
            .and(path(JOB_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Active" })))
            .up_to_n_times(2)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path(JOB_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Completed" })))
            .mount(&mock_server)
            .await;

        let request = request(&mock_server);
        let (outcome, report) = run(service(&mock_server), &request, pending())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(report.sleeps, 2);
        assert_eq!(count_requests(&mock_server, "GET").await, 3);
    }

    #[tokio::test]
    async fn test_failed_job_stops_after_one_poll() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "Failed",
                "failures": [{ "failureSource": "worker", "failureMessage": "boom" }]
            })))
            .mount(&mock_server)
            .await;

        let request = request(&mock_server);
        let (outcome, report) = run(service(&mock_server), &request, pending())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert!(!outcome.is_success());
        assert_eq!(report.polls, 1);
        assert_eq!(count_requests(&mock_server, "GET").await, 1);
    }

    #[tokio::test]
    async fn test_get_failure_is_fatal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let request = request(&mock_server);
        let err = run(service(&mock_server), &request, pending())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PollError>(),
            Some(PollError::Client(_))
        ));
        assert_eq!(count_requests(&mock_server, "GET").await, 1);
    }

    #[tokio::test]
    async fn test_non_string_status_keeps_polling() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": null })))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 7 })))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Completed" })))
            .mount(&mock_server)
            .await;

        let request = request(&mock_server);
        let (outcome, report) = run(service(&mock_server), &request, pending())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(report.sleeps, 2);
        assert_eq!(count_requests(&mock_server, "GET").await, 3);
    }

    #[tokio::test]
    async fn test_cancelled_counts_as_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Cancelled" })))
            .mount(&mock_server)
            .await;

        let request = request(&mock_server);
        let (outcome, _) = run(service(&mock_server), &request, pending())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(outcome.is_success());
    }
}
