use std::path::Path;
use std::time::Duration;

use thiserror::Error;

/// Audio capture and WAV errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No audio input device available")]
    NoInputDevice,

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to get device configuration: {0}")]
    DeviceConfig(String),

    #[error("Failed to build audio stream: {0}")]
    StreamBuild(String),

    #[error("Stream playback error: {0}")]
    StreamPlay(String),

    #[error("Audio stream failed while recording: {0}")]
    StreamFailed(String),

    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("Buffer error: {0}")]
    Buffer(String),

    #[error("No audio samples captured")]
    Empty,

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Records fixed-duration clips to disk.
///
/// Implementations block until the clip is written; async callers should run
/// them on a blocking thread.
pub trait AudioRecorder: Send + Sync {
    /// Record `duration` of mono audio into a WAV file at `path`
    fn record(&self, path: &Path, duration: Duration) -> Result<(), AudioError>;
}
