//! Job identifier
//!
//! The Job Service only accepts a restricted character set in the job id path
//! segment, so caller-supplied identifiers are sanitized before use.

use std::fmt;

use crate::error::ValidationError;

/// Longest sanitized job identifier the Job Service accepts
pub const MAX_JOB_ID_LEN: usize = 48;

/// Characters the Job Service rejects in identifiers; each becomes `_`
const UNSUPPORTED_CHARS: [char; 10] = ['.', ',', ':', ';', '*', '?', '!', '|', '(', ')'];

/// A sanitized job identifier, safe to embed in the job URI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// Validate and sanitize a raw job identifier
    ///
    /// Fails if `raw` is empty, or if the sanitized form is longer than
    /// [`MAX_JOB_ID_LEN`] characters.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::EmptyJobId);
        }

        let sanitized = Self::sanitize(raw);
        let len = sanitized.chars().count();
        if len > MAX_JOB_ID_LEN {
            return Err(ValidationError::JobIdTooLong { len });
        }

        Ok(Self(sanitized))
    }

    /// Replace every unsupported character with an underscore
    pub fn sanitize(raw: &str) -> String {
        raw.chars()
            .map(|c| if UNSUPPORTED_CHARS.contains(&c) { '_' } else { c })
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
