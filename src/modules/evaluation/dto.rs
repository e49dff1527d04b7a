use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EvaluateRequest {
    #[validate(
        required(message = "Both reference and generated summaries are required"),
        length(min = 1, message = "Both reference and generated summaries are required")
    )]
    #[serde(default)]
    pub reference: Option<String>,
    #[validate(
        required(message = "Both reference and generated summaries are required"),
        length(min = 1, message = "Both reference and generated summaries are required")
    )]
    #[serde(default)]
    pub generated: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct RougeScore {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct RougeReport {
    pub rouge1: RougeScore,
    pub rouge2: RougeScore,
    #[serde(rename = "rougeL")]
    pub rouge_l: RougeScore,
}
