//! Documents domain error types

use thiserror::Error;
use core_kernel::MoneyError;

/// Errors that can occur in the documents domain
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Sequence store error: {0}")]
    Sequence(String),

    #[error("Version store error: {0}")]
    Versioning(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl DocumentError {
    pub fn validation(message: impl Into<String>) -> Self {
        DocumentError::Validation(message.into())
    }

    pub fn sequence(message: impl Into<String>) -> Self {
        DocumentError::Sequence(message.into())
    }

    pub fn versioning(message: impl Into<String>) -> Self {
        DocumentError::Versioning(message.into())
    }
}
