//! Error types for the explorer.
//!
//! [`ExplorerError`] is what callers see. It has three kinds, each with a
//! status code:
//!
//! - `Validation` (400): a required field is missing or invalid. Nothing was
//!   processed.
//! - `NotFound` (404): a record lookup found nothing.
//! - `Internal` (500): anything else. The cause is kept as the error's
//!   source for logging but never appears in its message.

use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by [`Explorer`](crate::Explorer) operations.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// A required request field is missing or invalid.
    #[error("{0}")]
    Validation(String),

    /// No record with the given id exists for the object type.
    #[error("{object_type} record '{id}' not found")]
    NotFound { object_type: String, id: String },

    /// Unexpected failure while serving the request.
    #[error("internal server error")]
    Internal(#[source] BoxError),
}

impl ExplorerError {
    pub fn validation(message: impl Into<String>) -> Self {
        ExplorerError::Validation(message.into())
    }

    pub fn internal(cause: impl Into<BoxError>) -> Self {
        ExplorerError::Internal(cause.into())
    }

    /// HTTP-style status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ExplorerError::Validation(_) => 400,
            ExplorerError::NotFound { .. } => 404,
            ExplorerError::Internal(_) => 500,
        }
    }

    /// Short machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ExplorerError::Validation(_) => "validation",
            ExplorerError::NotFound { .. } => "not_found",
            ExplorerError::Internal(_) => "internal",
        }
    }
}

/// Failure inside a dataset source.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The source could not produce records.
    #[error("dataset source for '{object_type}' failed: {message}")]
    Source {
        object_type: String,
        message: String,
    },
}

/// Errors loading an [`ExplorerConfig`](crate::ExplorerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for explorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;
