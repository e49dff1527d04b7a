use super::dto::SubmitJobResponse;
use super::model::{JobRecord, JobStatus};
use super::repository::{JobStore, JobStoreError};
use crate::state::AppState;
use tracing::info;
use uuid::Uuid;

pub struct JobService;

impl JobService {
    pub async fn submit(state: AppState, video_url: String) -> Result<SubmitJobResponse, JobStoreError> {
        let job_id = Uuid::new_v4();

        state
            .jobs
            .create(job_id, JobRecord::queued(video_url.clone()))
            .await?;

        // Nothing cancels jobs yet; the token is dropped here.
        let _cancel = state.runner.spawn(job_id, video_url);

        info!(%job_id, "📥 Job queued");

        Ok(SubmitJobResponse {
            job_id,
            status: JobStatus::Queued,
        })
    }

    pub async fn status(state: AppState, job_id: &str) -> Result<JobRecord, JobStoreError> {
        // Ids are issued in lowercase hyphenated form only; anything else is unknown.
        let parsed = Uuid::try_parse(job_id)
            .ok()
            .filter(|id| id.hyphenated().to_string() == job_id)
            .ok_or(JobStoreError::NotFound(Uuid::nil()))?;
        state.jobs.get(parsed).await
    }
}
