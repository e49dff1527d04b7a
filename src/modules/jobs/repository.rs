use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use thiserror::Error;
use uuid::Uuid;

use super::model::{JobRecord, JobStatus, JobUpdate};

#[derive(Debug, Error)]
pub enum JobStoreError {
    #[error("Job not found")]
    NotFound(Uuid),
    #[error("job {0} already exists")]
    AlreadyExists(Uuid),
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },
    #[error("job is already {0}")]
    Finalized(JobStatus),
}

/// Registry of every job submitted to this process. Records are never removed.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create(&self, job_id: Uuid, record: JobRecord) -> Result<(), JobStoreError>;

    /// Returns a snapshot; later updates are not reflected in it.
    async fn get(&self, job_id: Uuid) -> Result<JobRecord, JobStoreError>;

    async fn update(&self, job_id: Uuid, update: JobUpdate) -> Result<JobRecord, JobStoreError>;

    async fn len(&self) -> usize;
}

#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: DashMap<Uuid, JobRecord>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn create(&self, job_id: Uuid, record: JobRecord) -> Result<(), JobStoreError> {
        match self.jobs.entry(job_id) {
            Entry::Occupied(_) => Err(JobStoreError::AlreadyExists(job_id)),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn get(&self, job_id: Uuid) -> Result<JobRecord, JobStoreError> {
        self.jobs
            .get(&job_id)
            .map(|entry| entry.value().clone())
            .ok_or(JobStoreError::NotFound(job_id))
    }

    async fn update(&self, job_id: Uuid, update: JobUpdate) -> Result<JobRecord, JobStoreError> {
        let mut entry = self
            .jobs
            .get_mut(&job_id)
            .ok_or(JobStoreError::NotFound(job_id))?;

        // The shard lock is held until `entry` drops, so the swap is atomic for readers.
        let mut next = entry.value().clone();
        next.apply(update)?;
        *entry.value_mut() = next.clone();
        Ok(next)
    }

    async fn len(&self) -> usize {
        self.jobs.len()
    }
}
