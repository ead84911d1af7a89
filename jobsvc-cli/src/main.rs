//! create-job
//!
//! Creates a job using the Job Service, then polls the service until the job
//! has completed or failed. The exit status is the only result:
//!
//! - `0`: job completed or was cancelled
//! - `1`: invalid input, HTTP failure, or job failed
//! - `3`: `--timeout` elapsed before a terminal status
//! - `130`: interrupted with Ctrl-C

mod caller;
mod config;
mod poller;
mod request;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use jobsvc_client::{ClientError, JobService, JobServiceClient};
use tracing::{Instrument, error, info, info_span, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::caller::Outcome;
use crate::config::{Config, DEFAULT_POLLING_INTERVAL_SECS};
use crate::poller::PollError;
use crate::request::{DefinitionSource, JobRequest};

const EXIT_FAILURE: u8 = 1;
const EXIT_TIMED_OUT: u8 = 3;
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "create-job")]
#[command(about = "Create a new job and wait for it to finish", long_about = None)]
struct Cli {
    /// Job identifier
    #[arg(short = 'j', long = "job", value_name = "jobId")]
    job_id: String,

    /// Job web service URL
    #[arg(short = 'u', long = "url", env = "JOB_SERVICE_URL", value_name = "jobWebServiceURL")]
    url: String,

    /// Correlation identifier
    #[arg(short = 'c', long = "correlation", default_value = "", value_name = "correlationId")]
    correlation_id: String,

    /// File containing the job definition; read from standard input when omitted
    #[arg(short = 'f', long = "filename", value_name = "jobDefinitionFilename")]
    filename: Option<PathBuf>,

    /// Seconds between job status checks
    #[arg(
        short = 'p',
        long = "polling",
        env = "JOB_POLLING_INTERVAL",
        default_value_t = DEFAULT_POLLING_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        value_name = "pollingInterval"
    )]
    polling_interval: u64,

    /// Stop polling after this many seconds (default: poll until the job finishes)
    #[arg(long = "timeout", env = "JOB_POLL_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Per-request HTTP timeout in seconds
    #[arg(long = "http-timeout", value_parser = clap::value_parser!(u64).range(1..))]
    http_timeout: Option<u64>,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new(self.url.clone());
        config.correlation_id = self.correlation_id.clone();
        config.polling_interval = Duration::from_secs(self.polling_interval);
        config.poll_timeout = self.timeout.map(Duration::from_secs);
        config.http_timeout = self.http_timeout.map(Duration::from_secs);
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "create_job=info,jobsvc_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let span = info_span!("create_job", correlation_id = %cli.correlation_id);

    match run(cli).instrument(span).await {
        Ok(Outcome::Completed | Outcome::Cancelled) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::from(EXIT_FAILURE),
        Err(e) => {
            error!("{:#}. Exiting.", e);
            if let Some(reason) = service_failure(&e) {
                error!("{}", reason);
            }
            ExitCode::from(exit_code_for(&e))
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome> {
    let source = DefinitionSource::from_path(cli.filename.clone());
    let request = JobRequest::build(&cli.job_id, &source, cli.config()).await?;

    let http = request
        .config
        .http_client()
        .context("Failed to build HTTP client")?;
    let client = JobServiceClient::with_client(request.config.url.clone(), http);

    info!(
        "Job service: {}, polling interval: {:?}",
        client.base_url(),
        request.config.polling_interval
    );

    let service: Arc<dyn JobService> = Arc::new(client);

    let (outcome, report) = caller::run(service, &request, interrupted()).await?;
    info!(
        "Job {} reached status {} after {} status check(s)",
        request.job_id, report.status, report.polls
    );

    Ok(outcome)
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Unable to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Which side of the HTTP exchange rejected a request, when the service answered
fn service_failure(error: &anyhow::Error) -> Option<String> {
    let client_error = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ClientError>())?;
    let status = client_error.status()?;

    if client_error.is_server_error() {
        Some(format!("The Job Service reported an internal error (HTTP {})", status))
    } else if client_error.is_client_error() {
        Some(format!("The Job Service rejected the request (HTTP {})", status))
    } else {
        None
    }
}

fn exit_code_for(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<PollError>() {
        Some(PollError::TimedOut(_)) => EXIT_TIMED_OUT,
        Some(PollError::Interrupted) => EXIT_INTERRUPTED,
        _ => EXIT_FAILURE,
    }
}
