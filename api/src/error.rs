//! API error mapping

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use submission_core::SubmissionError;
use thiserror::Error;

use crate::models::ApiResponse;

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// Query string or body that could not be decoded
    #[error("Validation error: {0}")]
    BadRequest(String),
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Submission(e) => status_for(e),
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Submission(SubmissionError::EmailExists) => "email_exists",
            Self::Submission(SubmissionError::NotFound) => "not_found",
            Self::Submission(SubmissionError::DuplicateId(_)) => "duplicate_id",
            Self::Submission(SubmissionError::Validation(_)) | Self::BadRequest(_) => "validation_error",
        }
    }
}

/// HTTP status for a store error
pub fn status_for(err: &SubmissionError) -> StatusCode {
    match err {
        SubmissionError::EmailExists | SubmissionError::DuplicateId(_) => StatusCode::CONFLICT,
        SubmissionError::NotFound => StatusCode::NOT_FOUND,
        SubmissionError::Validation(_) => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::error(self.code(), &self.to_string());
        (self.status(), Json(body)).into_response()
    }
}
