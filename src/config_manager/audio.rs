use serde::{Deserialize, Serialize};

/// Audio capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Target sample rate (Hz)
    #[serde(rename = "sample_rate")]
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Channels requested from the device; clips are always written mono
    #[serde(default = "default_channels")]
    pub channels: u16,

    /// Duration used when a request does not name one
    #[serde(rename = "default_duration_secs")]
    #[serde(default = "default_duration_secs")]
    pub default_duration_secs: f64,

    /// Input device name (None = default device)
    #[serde(default)]
    pub device: Option<String>,
}

fn default_sample_rate() -> u32 {
    44100
}

fn default_channels() -> u16 {
    1
}

fn default_duration_secs() -> f64 {
    5.0
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            default_duration_secs: default_duration_secs(),
            device: None,
        }
    }
}
