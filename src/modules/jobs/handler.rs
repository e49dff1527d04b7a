use super::dto::{SubmitJobResponse, SummarizeRequest};
use super::model::JobRecord;
use super::repository::JobStoreError;
use super::service::JobService;
use crate::common::response::{ApiError, ApiSuccess, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::error;
use validator::Validate;

/// Queue a video for download, transcription and summarization
#[utoipa::path(
    post,
    path = "/api/summarize",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Job queued", body = SubmitJobResponse),
        (status = 400, description = "Video URL is required", body = ErrorResponse)
    ),
    tag = "Jobs"
)]
pub async fn submit_job(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let video_url = payload.video_url.unwrap_or_default();

    match JobService::submit(state, video_url).await {
        Ok(res) => Ok(ApiSuccess(res, StatusCode::OK)),
        Err(e) => {
            error!("Failed to register job: {}", e);
            Err(ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

/// Current state of a job
#[utoipa::path(
    get,
    path = "/api/status/{job_id}",
    params(
        ("job_id" = String, Path, description = "Job ID returned by /api/summarize")
    ),
    responses(
        (status = 200, description = "Job record", body = JobRecord),
        (status = 404, description = "Job not found", body = ErrorResponse)
    ),
    tag = "Jobs"
)]
pub async fn get_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    match JobService::status(state, &job_id).await {
        Ok(record) => ApiSuccess(record, StatusCode::OK).into_response(),
        Err(e @ JobStoreError::NotFound(_)) => ApiError::not_found(e.to_string()).into_response(),
        Err(e) => ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}
