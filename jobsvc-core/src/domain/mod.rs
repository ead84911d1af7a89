//! Core domain types
//!
//! These types describe what the caller sends to the Job Service (identifier
//! and definition) and what it reads back (the job status document).

pub mod definition;
pub mod job;
pub mod job_id;
