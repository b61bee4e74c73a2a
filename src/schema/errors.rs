//! Schema error types
//!
//! Two families:
//! - `FieldErrors`: a record failed validation. Client-facing, one message per field.
//! - `SchemaError`: a schema definition could not be loaded. Fatal at startup.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Field name to human-readable message, for every field that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for a field. The first message for a field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Message for a single field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Names of the failing fields, sorted
    pub fn fields(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Schema loading errors
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Built-in schema name not recognised
    #[error("Unknown resource '{0}' (expected one of: {1})")]
    UnknownResource(String, String),

    /// Schema file could not be read
    #[error("Failed to read schema file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Schema file is not valid JSON for a schema
    #[error("Malformed schema file '{path}': {reason}")]
    Malformed { path: String, reason: String },

    /// Schema parsed but its structure is invalid
    #[error("Invalid schema '{name}': {reason}")]
    InvalidStructure { name: String, reason: String },
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
