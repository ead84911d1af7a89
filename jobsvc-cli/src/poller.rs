//! Job status poller
//!
//! Repeatedly fetches the job's status on a fixed interval until the Job
//! Service reports a terminal status. There is no retry: the first failed
//! status request ends polling.

use std::future::{Future, pending};
use std::sync::Arc;
use std::time::Duration;

use jobsvc_client::{ClientError, JobService};
use jobsvc_core::{Job, JobId, JobStatus};
use thiserror::Error;
use tokio::time;
use tracing::{error, info};

/// Why polling stopped without a terminal status
#[derive(Debug, Error)]
pub enum PollError {
    #[error("failed to retrieve job status: {0}")]
    Client(#[from] ClientError),

    #[error("job did not reach a terminal status within {0:?}")]
    TimedOut(Duration),

    #[error("polling interrupted")]
    Interrupted,
}

/// Terminal status reached, with how much polling it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    pub status: JobStatus,
    /// Status requests issued
    pub polls: u32,
    /// Sleeps taken between requests
    pub sleeps: u32,
}

/// Polls one job until it finishes
pub struct Poller {
    service: Arc<dyn JobService>,
    interval: Duration,
    deadline: Option<Duration>,
}

impl Poller {
    pub fn new(service: Arc<dyn JobService>, interval: Duration) -> Self {
        Self {
            service,
            interval,
            deadline: None,
        }
    }

    /// Stop with [`PollError::TimedOut`] once `deadline` has elapsed
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Poll until a terminal status, a failed request, the deadline, or `stop`
    ///
    /// A `Failed` job is returned as an `Ok` report; the caller decides what
    /// it means for the process.
    pub async fn poll_until_terminal(
        &self,
        job_id: &JobId,
        stop: impl Future<Output = ()>,
    ) -> Result<PollReport, PollError> {
        info!("Polling Job Service awaiting job completion ...");

        let deadline = async {
            match self.deadline {
                Some(limit) => time::sleep(limit).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            report = self.poll_loop(job_id) => report,
            _ = deadline => Err(PollError::TimedOut(self.deadline.unwrap_or_default())),
            _ = stop => Err(PollError::Interrupted),
        }
    }

    async fn poll_loop(&self, job_id: &JobId) -> Result<PollReport, PollError> {
        let mut polls = 0;
        let mut sleeps = 0;

        loop {
            info!("Calling Job Service to retrieve job status ...");
            let job = self.service.get_job(job_id).await?;
            polls += 1;

            if job.status.is_terminal() {
                log_terminal(job_id, &job);
                return Ok(PollReport {
                    status: job.status,
                    polls,
                    sleeps,
                });
            }

            match job.percentage_complete {
                Some(pct) => info!("Job {} is {} ({:.1}% complete)", job_id, job.status, pct),
                None => info!("Job {} is {}", job_id, job.status),
            }

            info!(
                "Going to sleep for {} seconds awaiting job completion ...",
                self.interval.as_secs_f64()
            );
            time::sleep(self.interval).await;
            sleeps += 1;
        }
    }
}

fn log_terminal(job_id: &JobId, job: &Job) {
    let label = match &job.name {
        Some(name) => format!("{} ({})", job_id, name),
        None => job_id.to_string(),
    };

    if job.status.is_success() {
        info!("Job {} finished with status {}", label, job.status);
        return;
    }

    error!("Job {} failed", label);
    for failure in &job.failures {
        error!("  {}", failure);
    }
}
