use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    DataDir,
    YtDlpBin,
    FfmpegLocation,
    WhisperBin,
    WhisperModel,
    SummarizerUrl,
    SummarizerTimeoutSecs,
    ModelLoadRetrySecs,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::DataDir => "DATA_DIR",
            EnvKey::YtDlpBin => "YTDLP_BIN",
            EnvKey::FfmpegLocation => "FFMPEG_LOCATION",
            EnvKey::WhisperBin => "WHISPER_BIN",
            EnvKey::WhisperModel => "WHISPER_MODEL",
            EnvKey::SummarizerUrl => "SUMMARIZER_URL",
            EnvKey::SummarizerTimeoutSecs => "SUMMARIZER_TIMEOUT_SECS",
            EnvKey::ModelLoadRetrySecs => "MODEL_LOAD_RETRY_SECS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Like [`get`], but treats an empty value the same as an unset one.
pub fn get_opt(key: EnvKey) -> Option<String> {
    get(key).ok().filter(|val| !val.trim().is_empty())
}
