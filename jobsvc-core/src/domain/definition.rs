//! Job definition payload

use std::io::Read;

use serde_json::Value;

use crate::error::ValidationError;

/// A job definition document, checked to be well-formed JSON
///
/// The Job Service owns the schema; the caller only guarantees the payload
/// parses and sends it in compact canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDefinition {
    value: Value,
    canonical: String,
}

impl JobDefinition {
    /// Parse a definition from JSON text
    pub fn from_json(text: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(value))
    }

    /// Read and parse a definition from any reader
    ///
    /// `source_name` is used only to describe I/O failures.
    pub fn from_reader<R: Read>(mut reader: R, source_name: &str) -> Result<Self, ValidationError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|error| ValidationError::Unreadable {
                source_name: source_name.to_string(),
                error,
            })?;
        Self::from_json(&text)
    }

    pub fn from_value(value: Value) -> Self {
        // Serializing a Value cannot fail: all map keys are strings.
        let canonical = value.to_string();
        Self { value, canonical }
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Compact serialization sent as the request body
    pub fn to_canonical_string(&self) -> &str {
        &self.canonical
    }
}
