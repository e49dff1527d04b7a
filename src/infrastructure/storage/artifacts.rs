use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use uuid::Uuid;

const DOWNLOADS_DIR: &str = "downloads";
const TRANSCRIPTS_DIR: &str = "transcripts";
const SUMMARIES_DIR: &str = "summaries";

/// Per-job files on local disk, all named by job id. Nothing is ever cleaned up.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn ensure_dirs(&self) -> Result<()> {
        for dir in [DOWNLOADS_DIR, TRANSCRIPTS_DIR, SUMMARIES_DIR] {
            let path = self.root.join(dir);
            tokio::fs::create_dir_all(&path)
                .await
                .with_context(|| format!("failed to create {}", path.display()))?;
        }
        info!("✅ Artifact directories ready under {}", self.root.display());
        Ok(())
    }

    pub fn download_path(&self, job_id: Uuid) -> PathBuf {
        self.root.join(DOWNLOADS_DIR).join(format!("{job_id}.mp4"))
    }

    pub fn transcript_path(&self, job_id: Uuid) -> PathBuf {
        self.root.join(TRANSCRIPTS_DIR).join(format!("{job_id}.txt"))
    }

    pub fn summary_path(&self, job_id: Uuid) -> PathBuf {
        self.root.join(SUMMARIES_DIR).join(format!("{job_id}.txt"))
    }

    pub async fn write_transcript(&self, job_id: Uuid, transcript: &str) -> Result<PathBuf> {
        let path = self.transcript_path(job_id);
        write_text(&path, transcript).await?;
        Ok(path)
    }

    pub async fn write_summary(&self, job_id: Uuid, summary: &str) -> Result<PathBuf> {
        let path = self.summary_path(job_id);
        write_text(&path, summary).await?;
        Ok(path)
    }
}

async fn write_text(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}
