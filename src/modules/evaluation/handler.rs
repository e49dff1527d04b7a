use super::dto::{EvaluateRequest, RougeReport};
use super::service::EvaluationService;
use crate::common::response::{ApiError, ApiSuccess, ErrorResponse};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

/// Score a generated summary against a reference summary
#[utoipa::path(
    post,
    path = "/api/evaluate",
    request_body = EvaluateRequest,
    responses(
        (status = 200, description = "ROUGE scores", body = RougeReport),
        (status = 400, description = "Both reference and generated summaries are required", body = ErrorResponse)
    ),
    tag = "Evaluation"
)]
pub async fn evaluate_summary(
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let reference = payload.reference.unwrap_or_default();
    let generated = payload.generated.unwrap_or_default();

    Ok(ApiSuccess(
        EvaluationService::score(&reference, &generated),
        StatusCode::OK,
    ))
}
