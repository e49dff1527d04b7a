use anyhow::Result;
use async_trait::async_trait;

pub mod summarizer;

/// Abstractive summarization with output length bounds, in model tokens.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, min_len: usize, max_len: usize) -> Result<String>;
}
