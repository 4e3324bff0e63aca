//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent misuse of the domain API.
///
/// Data problems inside an entity tree are not errors; they are collected
/// as [`Failure`](crate::domain::Failure)s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
