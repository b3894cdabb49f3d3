//! Error types for the seeker crate.

use thiserror::Error;

/// Errors that can occur when executing queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeekerError {
    /// A page must hold at least one record.
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(usize),
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
