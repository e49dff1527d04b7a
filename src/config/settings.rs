use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use crate::config::env::{self, EnvKey};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub data_dir: PathBuf,
    pub ytdlp_bin: String,
    pub ffmpeg_location: Option<String>,
    pub whisper_bin: String,
    pub whisper_model: String,
    pub summarizer_url: Url,
    pub summarizer_timeout: Duration,
    pub model_load_retry: Duration,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let summarizer_url = env::get_or(EnvKey::SummarizerUrl, "http://localhost:8080/summarize");
        let summarizer_url = Url::parse(&summarizer_url)
            .with_context(|| format!("invalid SUMMARIZER_URL: {summarizer_url}"))?;

        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 5000),
            data_dir: PathBuf::from(env::get_or(EnvKey::DataDir, "data")),
            ytdlp_bin: env::get_or(EnvKey::YtDlpBin, "yt-dlp"),
            ffmpeg_location: env::get_opt(EnvKey::FfmpegLocation),
            whisper_bin: env::get_or(EnvKey::WhisperBin, "whisper"),
            whisper_model: env::get_or(EnvKey::WhisperModel, "base"),
            summarizer_url,
            summarizer_timeout: Duration::from_secs(env::get_parsed(EnvKey::SummarizerTimeoutSecs, 120)),
            model_load_retry: Duration::from_secs(env::get_parsed(EnvKey::ModelLoadRetrySecs, 5)),
        })
    }
}
