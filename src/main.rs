use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod modules;
mod routes;
mod state;
mod workers;

#[cfg(test)]
mod testing;

use crate::config::settings::AppConfig;
use crate::infrastructure::media::ytdlp::YtDlpFetcher;
use crate::infrastructure::models::ModelHub;
use crate::infrastructure::storage::artifacts::ArtifactStore;
use crate::modules::jobs::repository::{InMemoryJobStore, JobStore};
use crate::state::AppState;
use crate::workers::runner::JobRunner;
use crate::workers::stages::Pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting server...");

    let config = AppConfig::new()?;

    let artifacts = ArtifactStore::new(&config.data_dir);
    artifacts.ensure_dirs().await?;

    let models = ModelHub::new();
    models.spawn_loader(config.clone());

    let jobs: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());
    let fetcher = Arc::new(YtDlpFetcher::new(
        config.ytdlp_bin.clone(),
        config.ffmpeg_location.clone(),
    ));
    let pipeline = Pipeline::new(Arc::clone(&jobs), fetcher, models.clone(), artifacts);
    let state = AppState::new(jobs, JobRunner::new(pipeline), models);

    let app = app::create_app(state).await;

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
