//! Error types for the submission engine

use thiserror::Error;

use crate::domain::value_objects::{EmailError, FieldError};

/// Submission engine error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Another record already uses the email
    #[error("Email already exists")]
    EmailExists,

    /// No record with the requested id
    #[error("Record not found")]
    NotFound,

    /// A record with the same id is already stored
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// Input rejected before touching the store
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<EmailError> for SubmissionError {
    fn from(err: EmailError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<FieldError> for SubmissionError {
    fn from(err: FieldError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type for the submission engine
pub type Result<T> = std::result::Result<T, SubmissionError>;
