use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::settings::AppConfig;
use crate::infrastructure::inference::summarizer::HttpSummarizer;
use crate::infrastructure::inference::Summarizer;
use crate::infrastructure::speech::whisper::WhisperTranscriber;
use crate::infrastructure::speech::Transcriber;

pub mod ready;

pub use ready::ReadyCell;

#[derive(Clone, Default)]
pub struct ModelHub {
    pub transcriber: ReadyCell<dyn Transcriber>,
    pub summarizer: ReadyCell<dyn Summarizer>,
}

impl ModelHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.transcriber.is_ready() && self.summarizer.is_ready()
    }

    /// Each model retries until loaded and opens its own cell; neither waits on the other.
    pub fn spawn_loader(&self, config: AppConfig) -> JoinHandle<()> {
        let hub = self.clone();
        tokio::spawn(async move {
            let retry = config.model_load_retry;

            let summarizer = async {
                info!("Loading summarization model...");
                let summarizer = load_with_retry("summarizer", retry, || {
                    HttpSummarizer::load(config.summarizer_url.clone(), config.summarizer_timeout)
                })
                .await;
                hub.summarizer.set(Arc::new(summarizer));
            };

            let transcriber = async {
                info!("Loading Whisper model...");
                let transcriber = load_with_retry("whisper", retry, || {
                    WhisperTranscriber::load(config.whisper_bin.clone(), config.whisper_model.clone())
                })
                .await;
                hub.transcriber.set(Arc::new(transcriber));
            };

            tokio::join!(summarizer, transcriber);
            info!("Models loaded successfully");
        })
    }
}

async fn load_with_retry<T, F, Fut>(name: &str, retry: Duration, mut load: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1u32;
    loop {
        match load().await {
            Ok(model) => return model,
            Err(e) => {
                warn!(model = name, attempt, "Model load failed: {:#}. Retrying in {:?}", e, retry);
                tokio::time::sleep(retry).await;
                attempt += 1;
            }
        }
    }
}
