//! Submission endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use submission_core::{
    CreateSubmissionCommand, CreateSubmissionOutcome, EntityId, Page, Submission, SubmissionDraft,
    SubmissionError, SubmissionQuery, UpdateSubmissionCommand, UpdateSubmissionOutcome,
    DEFAULT_PAGE_SIZE,
};

use crate::error::{status_for, ApiError};
use crate::{models::*, ApiState};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_submissions).post(create_submission))
        .route("/email-exists", get(email_exists))
        .route("/:id", get(get_submission).put(update_submission))
}

/// Search, sort and paginate submissions
#[utoipa::path(
    get,
    path = "/api/v1/submissions",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-based)"),
        ("pageSize" = Option<u32>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Case-insensitive text filter"),
        ("sortBy" = Option<String>, Query, description = "name, email, age, customFields, createdAt or updatedAt"),
        ("sortDirection" = Option<String>, Query, description = "asc or desc")
    ),
    responses(
        (status = 200, description = "One page of submissions"),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse)
    ),
    tag = "submissions"
)]
pub async fn list_submissions(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<SubmissionQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Page<Submission>>>, ApiError> {
    let Query(mut query) = query?;
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    query.page_size = Some(page_size.min(state.config.max_page_size));
    let page = state.submissions.query_submissions(query).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// Create a submission
#[utoipa::path(
    post,
    path = "/api/v1/submissions",
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 201, description = "Submission created"),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already exists")
    ),
    tag = "submissions"
)]
pub async fn create_submission(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateSubmissionCommand>, JsonRejection>,
) -> (StatusCode, Json<CreateSubmissionOutcome>) {
    let Json(command) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let err = ApiError::from(rejection);
            let outcome = CreateSubmissionOutcome { success: false, id: None, error: Some(err.to_string()) };
            return (err.status(), Json(outcome));
        }
    };
    let result = state.submissions.create_submission(command).await;
    let status = match &result {
        Ok(_) => StatusCode::CREATED,
        Err(e) => status_for(e),
    };
    (status, Json(CreateSubmissionOutcome::from(result)))
}

/// Get submission by ID
#[utoipa::path(
    get,
    path = "/api/v1/submissions/{id}",
    params(("id" = String, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Submission details"),
        (status = 404, description = "Record not found", body = ErrorResponse)
    ),
    tag = "submissions"
)]
pub async fn get_submission(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Submission>>, ApiError> {
    let submission = state
        .submissions
        .get_submission(&EntityId::from_string(id))
        .await?
        .ok_or(SubmissionError::NotFound)?;
    Ok(Json(ApiResponse::success(submission)))
}

/// Replace the editable content of a submission
#[utoipa::path(
    put,
    path = "/api/v1/submissions/{id}",
    params(("id" = String, Path, description = "Submission ID")),
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Submission updated"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Record not found"),
        (status = 409, description = "Email already exists")
    ),
    tag = "submissions"
)]
pub async fn update_submission(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    payload: Result<Json<SubmissionDraft>, JsonRejection>,
) -> (StatusCode, Json<UpdateSubmissionOutcome>) {
    let Json(draft) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let err = ApiError::from(rejection);
            let outcome = UpdateSubmissionOutcome { success: false, error: Some(err.to_string()) };
            return (err.status(), Json(outcome));
        }
    };
    let result = state
        .submissions
        .update_submission(UpdateSubmissionCommand::new(id, draft))
        .await;
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => status_for(e),
    };
    (status, Json(UpdateSubmissionOutcome::from(result)))
}

/// Check whether an email is already taken
#[utoipa::path(
    get,
    path = "/api/v1/submissions/email-exists",
    params(EmailExistsParams),
    responses(
        (status = 200, description = "Availability of the address", body = EmailExistsResponse),
        (status = 400, description = "Missing email parameter", body = ErrorResponse)
    ),
    tag = "submissions"
)]
pub async fn email_exists(
    State(state): State<Arc<ApiState>>,
    params: Result<Query<EmailExistsParams>, QueryRejection>,
) -> Result<Json<ApiResponse<EmailExistsResponse>>, ApiError> {
    let Query(params) = params?;
    let exclude_id = params.exclude_id.map(EntityId::from_string);
    let exists = state
        .submissions
        .email_exists(&params.email, exclude_id.as_ref())
        .await?;
    Ok(Json(ApiResponse::success(EmailExistsResponse { exists })))
}
