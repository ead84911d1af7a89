//! Job request validation
//!
//! Turns raw command-line input into an immutable [`JobRequest`]. Checks run
//! in a fixed order and the first violation wins; nothing here touches the
//! network.

use std::fs::File;
use std::path::PathBuf;

use jobsvc_core::{JobDefinition, JobId, ValidationError};
use tracing::info;

use crate::config::Config;

/// Where the job definition JSON is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionSource {
    File(PathBuf),
    Stdin,
}

impl DefinitionSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdin, Self::File)
    }

    /// Human-readable name used in log lines and errors
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "standard input".to_string(),
        }
    }

    fn load(&self) -> Result<JobDefinition, ValidationError> {
        match self {
            Self::File(path) => {
                let file = File::open(path).map_err(|error| ValidationError::Unreadable {
                    source_name: self.describe(),
                    error,
                })?;
                JobDefinition::from_reader(file, &self.describe())
            }
            Self::Stdin => JobDefinition::from_reader(std::io::stdin().lock(), &self.describe()),
        }
    }
}

/// Everything needed to submit and track one job
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub job_id: JobId,
    pub definition: JobDefinition,
    pub config: Config,
}

impl JobRequest {
    /// Validate input in order: job id, definition, then service URL
    ///
    /// The definition is read on the blocking thread pool, since standard
    /// input may not be ready.
    pub async fn build(
        raw_job_id: &str,
        source: &DefinitionSource,
        config: Config,
    ) -> Result<Self, ValidationError> {
        info!("Validating command line arguments ...");

        let job_id = JobId::parse(raw_job_id)?;
        if job_id.as_str() != raw_job_id {
            info!("Job identifier sanitized from '{}' to '{}'", raw_job_id, job_id);
        }

        info!("Reading job definition from {}", source.describe());
        let loader = source.clone();
        let definition = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|join_error| ValidationError::Unreadable {
                source_name: source.describe(),
                error: std::io::Error::other(join_error),
            })??;

        config.validate()?;

        Ok(Self {
            job_id,
            definition,
            config,
        })
    }
}
