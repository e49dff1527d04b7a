use std::sync::Arc;

use crate::infrastructure::models::ModelHub;
use crate::modules::jobs::repository::JobStore;
use crate::workers::runner::JobRunner;

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobStore>,
    pub runner: JobRunner,
    pub models: ModelHub,
}

impl AppState {
    pub fn new(jobs: Arc<dyn JobStore>, runner: JobRunner, models: ModelHub) -> Self {
        Self {
            jobs,
            runner,
            models,
        }
    }
}
