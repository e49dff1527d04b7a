use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::MediaFetcher;

const FORMAT: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best";

#[derive(Clone, Debug)]
pub struct YtDlpFetcher {
    bin: String,
    ffmpeg_location: Option<String>,
}

impl YtDlpFetcher {
    pub fn new(bin: impl Into<String>, ffmpeg_location: Option<String>) -> Self {
        Self {
            bin: bin.into(),
            ffmpeg_location,
        }
    }

    fn command(&self, url: &str, dest: &Path) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.args(["--no-playlist", "--no-progress", "-f", FORMAT])
            .args(["--merge-output-format", "mp4"])
            .arg("-o")
            .arg(dest);
        if let Some(ffmpeg) = &self.ffmpeg_location {
            cmd.args(["--ffmpeg-location", ffmpeg.as_str()]);
        }
        cmd.arg(url);
        cmd
    }
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<PathBuf> {
        info!("⬇️ Downloading {}", url);

        let output = self
            .command(url, dest)
            .output()
            .await
            .with_context(|| format!("failed to run {}", self.bin))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("{} exited with {}: {}", self.bin, output.status, stderr.trim()));
        }

        if !tokio::fs::try_exists(dest).await.unwrap_or(false) {
            return Err(anyhow!("{} reported success but {} is missing", self.bin, dest.display()));
        }

        debug!("yt-dlp wrote {}", dest.display());
        Ok(dest.to_path_buf())
    }
}
