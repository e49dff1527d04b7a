//! Fakes for the external collaborators and a harness wiring them into a
//! runner over a temporary data directory.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tempfile::TempDir;
use uuid::Uuid;

use crate::infrastructure::inference::Summarizer;
use crate::infrastructure::media::MediaFetcher;
use crate::infrastructure::models::ModelHub;
use crate::infrastructure::speech::Transcriber;
use crate::infrastructure::storage::artifacts::ArtifactStore;
use crate::modules::jobs::model::{JobRecord, JobStatus};
use crate::modules::jobs::repository::{InMemoryJobStore, JobStore};
use crate::state::AppState;
use crate::workers::runner::JobRunner;
use crate::workers::stages::Pipeline;

#[derive(Clone, Default)]
pub struct FakeFetcher {
    fail: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl FakeFetcher {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaFetcher for FakeFetcher {
    async fn fetch(&self, _url: &str, dest: &Path) -> Result<PathBuf> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail {
            bail!("{message}");
        }
        tokio::fs::write(dest, b"fake media").await?;
        Ok(dest.to_path_buf())
    }
}

#[derive(Clone)]
pub struct FakeTranscriber {
    outcome: Result<String, String>,
    calls: Arc<AtomicUsize>,
}

impl FakeTranscriber {
    pub fn ok(transcript: &str) -> Self {
        Self {
            outcome: Ok(transcript.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(&self, _media: &Path) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(transcript) => Ok(transcript.clone()),
            Err(message) => bail!("{message}"),
        }
    }
}

/// Answers `"  summary of N words  "` and records `(input chars, min_len, max_len)` per call.
#[derive(Clone, Default)]
pub struct FakeSummarizer {
    fail: Option<String>,
    calls: Arc<Mutex<Vec<(usize, usize, usize)>>>,
}

impl FakeSummarizer {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(usize, usize, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, text: &str, min_len: usize, max_len: usize) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((text.chars().count(), min_len, max_len));
        if let Some(message) = &self.fail {
            bail!("{message}");
        }
        Ok(format!("  summary of {} words  ", text.split_whitespace().count()))
    }
}

pub struct Harness {
    pub jobs: Arc<dyn JobStore>,
    pub runner: JobRunner,
    pub models: ModelHub,
    pub artifacts: ArtifactStore,
    pub fetcher: FakeFetcher,
    pub transcriber: FakeTranscriber,
    pub summarizer: FakeSummarizer,
    _dir: TempDir,
}

impl Harness {
    /// Models are left unloaded; tests set them on `models` when they want.
    pub async fn unloaded(
        fetcher: FakeFetcher,
        transcriber: FakeTranscriber,
        summarizer: FakeSummarizer,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = ArtifactStore::new(dir.path());
        artifacts.ensure_dirs().await.unwrap();

        let jobs: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());
        let models = ModelHub::new();
        let pipeline = Pipeline::new(
            Arc::clone(&jobs),
            Arc::new(fetcher.clone()),
            models.clone(),
            artifacts.clone(),
        );

        Self {
            jobs,
            runner: JobRunner::new(pipeline),
            models,
            artifacts,
            fetcher,
            transcriber,
            summarizer,
            _dir: dir,
        }
    }

    pub async fn ready(
        fetcher: FakeFetcher,
        transcriber: FakeTranscriber,
        summarizer: FakeSummarizer,
    ) -> Self {
        let harness = Self::unloaded(fetcher, transcriber, summarizer).await;
        harness.models.transcriber.set(Arc::new(harness.transcriber.clone()));
        harness.models.summarizer.set(Arc::new(harness.summarizer.clone()));
        harness
    }

    pub fn state(&self) -> AppState {
        AppState::new(Arc::clone(&self.jobs), self.runner.clone(), self.models.clone())
    }
}

async fn wait_until(jobs: &dyn JobStore, id: Uuid, done: impl Fn(&JobRecord) -> bool) -> JobRecord {
    for _ in 0..500 {
        if let Ok(record) = jobs.get(id).await {
            if done(&record) {
                return record;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {id} did not reach the expected state in time");
}

pub async fn wait_for_status(jobs: &dyn JobStore, id: Uuid, status: JobStatus) -> JobRecord {
    wait_until(jobs, id, |record| record.status == status).await
}

pub async fn wait_for_terminal(jobs: &dyn JobStore, id: Uuid) -> JobRecord {
    wait_until(jobs, id, |record| record.status.is_terminal()).await
}
