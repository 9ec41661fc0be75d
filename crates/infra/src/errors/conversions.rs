//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use calembed_domain::CalEmbedError;
use serde_json::Error as JsonError;
use tempfile::PersistError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CalEmbedError);

impl From<InfraError> for CalEmbedError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CalEmbedError> for InfraError {
    fn from(value: CalEmbedError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCalEmbedError {
    fn into_calembed(self) -> CalEmbedError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → CalEmbedError */
/* -------------------------------------------------------------------------- */

impl IntoCalEmbedError for IoError {
    fn into_calembed(self) -> CalEmbedError {
        match self.kind() {
            ErrorKind::PermissionDenied => {
                CalEmbedError::Storage(format!("permission denied: {self}"))
            }
            ErrorKind::NotFound => CalEmbedError::Storage(format!("file not found: {self}")),
            _ => CalEmbedError::Storage(format!("I/O failure: {self}")),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_calembed())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → CalEmbedError */
/* -------------------------------------------------------------------------- */

impl IntoCalEmbedError for JsonError {
    fn into_calembed(self) -> CalEmbedError {
        use serde_json::error::Category;

        match self.classify() {
            Category::Io => CalEmbedError::Storage(format!("I/O failure during JSON: {self}")),
            Category::Syntax | Category::Eof => {
                CalEmbedError::Storage(format!("corrupt JSON document: {self}"))
            }
            Category::Data => CalEmbedError::Storage(format!("unexpected JSON shape: {self}")),
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_calembed())
    }
}

/* -------------------------------------------------------------------------- */
/* tempfile::PersistError → CalEmbedError */
/* -------------------------------------------------------------------------- */

impl IntoCalEmbedError for PersistError {
    fn into_calembed(self) -> CalEmbedError {
        CalEmbedError::Storage(format!("failed to replace settings file: {}", self.error))
    }
}

impl From<PersistError> for InfraError {
    fn from(value: PersistError) -> Self {
        InfraError(value.into_calembed())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
