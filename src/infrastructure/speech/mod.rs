use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

pub mod whisper;

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, media: &Path) -> Result<String>;
}
