//! Dashboard statistics endpoint

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use submission_core::SubmissionStats;

use crate::error::ApiError;
use crate::{models::*, ApiState};

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/", get(get_submission_stats))
}

/// Timeline, age distribution, custom field usage and totals
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses((status = 200, description = "Statistics over every stored submission")),
    tag = "stats"
)]
pub async fn get_submission_stats(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ApiResponse<SubmissionStats>>, ApiError> {
    let stats = state.submissions.submission_stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}
