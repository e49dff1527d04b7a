use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::bail;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::chunker::{chunk_text, clean_text, CHUNK_CHAR_BUDGET};
use crate::infrastructure::media::MediaFetcher;
use crate::infrastructure::models::ModelHub;
use crate::infrastructure::storage::artifacts::ArtifactStore;
use crate::modules::jobs::model::{JobStatus, JobUpdate};
use crate::modules::jobs::repository::{JobStore, JobStoreError};

// (min, max) output length, in model tokens
const CHUNK_SUMMARY_LEN: (usize, usize) = (30, 130);
const FINAL_SUMMARY_LEN: (usize, usize) = (100, 250);

/// Failure of one pipeline stage. The `Display` text is what ends up in the
/// job record's `error` field.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Error downloading video: {0:#}")]
    Download(anyhow::Error),
    #[error("Error transcribing video: {0:#}")]
    Transcription(anyhow::Error),
    #[error("Error generating summary: {0:#}")]
    Summarization(anyhow::Error),
    #[error("Job cancelled")]
    Cancelled,
    #[error(transparent)]
    Store(#[from] JobStoreError),
}

#[derive(Clone)]
pub struct Pipeline {
    jobs: Arc<dyn JobStore>,
    fetcher: Arc<dyn MediaFetcher>,
    models: ModelHub,
    artifacts: ArtifactStore,
}

impl Pipeline {
    pub fn new(
        jobs: Arc<dyn JobStore>,
        fetcher: Arc<dyn MediaFetcher>,
        models: ModelHub,
        artifacts: ArtifactStore,
    ) -> Self {
        Self {
            jobs,
            fetcher,
            models,
            artifacts,
        }
    }

    pub fn jobs(&self) -> &Arc<dyn JobStore> {
        &self.jobs
    }

    pub async fn fetch_media(&self, job_id: Uuid, video_url: &str) -> Result<PathBuf, StageError> {
        self.enter(job_id, JobStatus::Downloading).await?;

        let dest = self.artifacts.download_path(job_id);
        let result = self.fetcher.fetch(video_url, &dest).await;
        self.settle(job_id, result, StageError::Download).await
    }

    pub async fn transcribe(&self, job_id: Uuid, media: &Path) -> Result<String, StageError> {
        self.enter(job_id, JobStatus::Transcribing).await?;

        let result = self.transcribe_media(job_id, media).await;
        self.settle(job_id, result, StageError::Transcription).await
    }

    pub async fn summarize(&self, job_id: Uuid, transcript: &str) -> Result<String, StageError> {
        self.enter(job_id, JobStatus::Summarizing).await?;

        let result = self.summarize_transcript(job_id, transcript).await;
        self.settle(job_id, result, StageError::Summarization).await
    }

    async fn transcribe_media(&self, job_id: Uuid, media: &Path) -> anyhow::Result<String> {
        if !self.models.transcriber.is_ready() {
            info!(%job_id, "⏳ Waiting for Whisper model to load");
        }
        let transcriber = self.models.transcriber.wait().await;

        let transcript = transcriber.transcribe(media).await?;
        self.artifacts.write_transcript(job_id, &transcript).await?;
        Ok(transcript)
    }

    async fn summarize_transcript(&self, job_id: Uuid, transcript: &str) -> anyhow::Result<String> {
        if !self.models.summarizer.is_ready() {
            info!(%job_id, "⏳ Waiting for summarization model to load");
        }
        let summarizer = self.models.summarizer.wait().await;

        let cleaned = clean_text(transcript);
        let chunks = chunk_text(&cleaned, CHUNK_CHAR_BUDGET);
        if chunks.is_empty() {
            bail!("transcript is empty");
        }

        let total = chunks.len();
        let mut summaries = Vec::with_capacity(total);
        for (i, chunk) in chunks.iter().enumerate() {
            self.jobs
                .update(job_id, JobUpdate::Progress(format!("Summarizing chunk {}/{}", i + 1, total)))
                .await?;
            let (min_len, max_len) = CHUNK_SUMMARY_LEN;
            summaries.push(summarizer.summarize(chunk, min_len, max_len).await?);
        }

        let summary = match summaries.as_slice() {
            [single] => single.clone(),
            _ => {
                let (min_len, max_len) = FINAL_SUMMARY_LEN;
                summarizer.summarize(&summaries.join(" "), min_len, max_len).await?
            }
        };

        let summary = summary.trim().to_string();
        self.artifacts.write_summary(job_id, &summary).await?;
        Ok(summary)
    }

    async fn enter(&self, job_id: Uuid, status: JobStatus) -> Result<(), StageError> {
        self.jobs.update(job_id, JobUpdate::Status(status)).await?;
        Ok(())
    }

    async fn settle<T>(
        &self,
        job_id: Uuid,
        result: anyhow::Result<T>,
        wrap: fn(anyhow::Error) -> StageError,
    ) -> Result<T, StageError> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                let err = wrap(e);
                if let Err(store_err) = self.jobs.update(job_id, JobUpdate::Error(err.to_string())).await {
                    warn!(%job_id, "Failed to record stage error: {}", store_err);
                }
                Err(err)
            }
        }
    }
}
