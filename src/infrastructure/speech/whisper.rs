use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use super::Transcriber;

/// Runs the `whisper` CLI and reads back the `.txt` transcript it writes
/// next to the input file.
#[derive(Clone, Debug)]
pub struct WhisperTranscriber {
    bin: String,
    model: String,
}

impl WhisperTranscriber {
    pub async fn load(bin: String, model: String) -> Result<Self> {
        let output = Command::new(&bin)
            .arg("--help")
            .output()
            .await
            .with_context(|| format!("failed to run {bin}"))?;

        if !output.status.success() {
            bail!("{bin} --help exited with {}", output.status);
        }

        info!("✅ Whisper ready (model: {})", model);
        Ok(Self { bin, model })
    }

    fn transcript_file(media: &Path) -> Result<PathBuf> {
        let stem = media
            .file_stem()
            .ok_or_else(|| anyhow!("{} has no file name", media.display()))?;
        let mut name = stem.to_os_string();
        name.push(".txt");
        Ok(output_dir(media).join(name))
    }
}

fn output_dir(media: &Path) -> &Path {
    match media.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, media: &Path) -> Result<String> {
        let output = Command::new(&self.bin)
            .arg(media)
            .args(["--model", self.model.as_str()])
            .args(["--output_format", "txt", "--fp16", "False", "--verbose", "False"])
            .arg("--output_dir")
            .arg(output_dir(media))
            .output()
            .await
            .with_context(|| format!("failed to run {}", self.bin))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} exited with {}: {}", self.bin, output.status, stderr.trim());
        }

        let transcript_file = Self::transcript_file(media)?;
        tokio::fs::read_to_string(&transcript_file)
            .await
            .with_context(|| format!("failed to read {}", transcript_file.display()))
    }
}
