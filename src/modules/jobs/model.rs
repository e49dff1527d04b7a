use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::repository::JobStoreError;

// Declared in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Downloading,
    Transcribing,
    Summarizing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Downloading => "downloading",
            JobStatus::Transcribing => "transcribing",
            JobStatus::Summarizing => "summarizing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        use JobStatus::*;
        matches!(
            (self, next),
            (Queued, Downloading)
                | (Downloading, Transcribing)
                | (Transcribing, Summarizing)
                | (Summarizing, Completed)
                | (Queued | Downloading | Transcribing | Summarizing, Failed)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub status: JobStatus,
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobUpdate {
    Status(JobStatus),
    Progress(String),
    Error(String),
    Complete { summary: String },
    /// Marks the job failed, keeping any error a stage already recorded.
    Fail { error: String },
}

impl JobRecord {
    pub fn queued(video_url: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Queued,
            video_url: video_url.into(),
            progress: None,
            error: None,
            summary: None,
        }
    }

    pub fn apply(&mut self, update: JobUpdate) -> Result<(), JobStoreError> {
        if self.status.is_terminal() {
            return Err(JobStoreError::Finalized(self.status));
        }

        match update {
            JobUpdate::Status(next) => self.advance(next)?,
            JobUpdate::Progress(note) => self.progress = Some(note),
            JobUpdate::Error(message) => self.error = Some(message),
            JobUpdate::Complete { summary } => {
                self.advance(JobStatus::Completed)?;
                self.summary = Some(summary);
            }
            JobUpdate::Fail { error } => {
                self.advance(JobStatus::Failed)?;
                if self.error.is_none() {
                    self.error = Some(error);
                }
            }
        }

        Ok(())
    }

    fn advance(&mut self, next: JobStatus) -> Result<(), JobStoreError> {
        if !self.status.can_transition_to(next) {
            return Err(JobStoreError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
