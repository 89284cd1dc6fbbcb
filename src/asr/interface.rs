use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::audio::AudioError;

/// Transcription failures
#[derive(Error, Debug)]
pub enum AsrError {
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Transcription service error: {0}")]
    Service(String),
}

/// ASR interface trait - turns a recorded clip into text
#[async_trait]
pub trait ASRInterface: Send + Sync {
    /// Transcribe the WAV file at `audio_path`.
    ///
    /// `Ok("")` means the service heard no speech.
    async fn transcribe_file(&self, audio_path: &Path) -> Result<String, AsrError>;

    /// Backend name, for logs and the health endpoint
    fn name(&self) -> &str;
}

/// Transcribe, treating any failure as "no transcript"
pub async fn transcribe_or_empty(asr: &dyn ASRInterface, audio_path: &Path) -> String {
    match asr.transcribe_file(audio_path).await {
        Ok(text) => {
            debug!("{} transcript: {:?}", asr.name(), text);
            text
        }
        Err(e) => {
            warn!("{} transcription failed for {}: {}", asr.name(), audio_path.display(), e);
            String::new()
        }
    }
}
