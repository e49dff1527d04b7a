use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

use super::stages::{Pipeline, StageError};
use crate::modules::jobs::model::JobUpdate;
use crate::modules::jobs::repository::JobStore;

#[derive(Clone)]
pub struct JobRunner {
    pipeline: Pipeline,
}

impl JobRunner {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Starts the job on its own task. The returned token cancels the job
    /// before its next stage begins.
    pub fn spawn(&self, job_id: Uuid, video_url: String) -> CancellationToken {
        let cancel = CancellationToken::new();
        let runner = self.clone();
        let token = cancel.clone();

        tokio::spawn(async move {
            runner.run(job_id, video_url, token).await;
        });

        cancel
    }

    pub async fn run(&self, job_id: Uuid, video_url: String, cancel: CancellationToken) {
        info!(%job_id, "🔁 Starting processing for {}", video_url);

        let update = match self.execute(job_id, &video_url, &cancel).await {
            Ok(summary) => {
                info!(%job_id, "✅ Job completed");
                JobUpdate::Complete { summary }
            }
            Err(e) => {
                error!(%job_id, "❌ Error in processing: {}", e);
                JobUpdate::Fail { error: e.to_string() }
            }
        };

        if let Err(e) = self.pipeline.jobs().update(job_id, update).await {
            error!(%job_id, "Failed to record final job state: {}", e);
        }
    }

    async fn execute(
        &self,
        job_id: Uuid,
        video_url: &str,
        cancel: &CancellationToken,
    ) -> Result<String, StageError> {
        checkpoint(cancel)?;
        let video_path = self.pipeline.fetch_media(job_id, video_url).await?;
        info!(%job_id, "✅ Downloaded video to: {}", video_path.display());

        checkpoint(cancel)?;
        let transcript = self.pipeline.transcribe(job_id, &video_path).await?;
        info!(%job_id, "✅ Transcript created: {} chars", transcript.chars().count());

        checkpoint(cancel)?;
        let summary = self.pipeline.summarize(job_id, &transcript).await?;
        info!(%job_id, "✅ Summary created: {} chars", summary.chars().count());

        Ok(summary)
    }
}

fn checkpoint(cancel: &CancellationToken) -> Result<(), StageError> {
    if cancel.is_cancelled() {
        Err(StageError::Cancelled)
    } else {
        Ok(())
    }
}
