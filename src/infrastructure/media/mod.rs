use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

pub mod ytdlp;

/// Downloads the media behind a URL to a local file.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<PathBuf>;
}
