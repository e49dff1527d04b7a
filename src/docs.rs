use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::jobs::handler::submit_job,
        crate::modules::jobs::handler::get_status,
        crate::modules::evaluation::handler::evaluate_summary,
        crate::routes::health,
    ),
    components(
        schemas(
            crate::common::response::ErrorResponse,
            crate::modules::jobs::dto::SummarizeRequest,
            crate::modules::jobs::dto::SubmitJobResponse,
            crate::modules::jobs::model::JobRecord,
            crate::modules::jobs::model::JobStatus,
            crate::modules::evaluation::dto::EvaluateRequest,
            crate::modules::evaluation::dto::RougeReport,
            crate::modules::evaluation::dto::RougeScore,
            crate::routes::HealthResponse,
        )
    ),
    tags(
        (name = "Jobs", description = "Video summarization jobs"),
        (name = "Evaluation", description = "Summary scoring"),
        (name = "Health", description = "Service status")
    )
)]
pub struct ApiDoc;
