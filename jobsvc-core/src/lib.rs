//! Job Service Core
//!
//! Core types shared by the Job Service client and the `create-job` caller.
//!
//! This crate contains:
//! - Domain types: job identifiers, job definitions and the job status document
//! - Validation errors raised while building those types from user input

pub mod domain;
pub mod error;

pub use domain::definition::JobDefinition;
pub use domain::job::{Failure, Job, JobStatus};
pub use domain::job_id::{JobId, MAX_JOB_ID_LEN};
pub use error::ValidationError;
