use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// System configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory recorded and uploaded clips are written to
    #[serde(rename = "audio_dir")]
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,

    /// Directory holding `index.html`
    #[serde(rename = "templates_dir")]
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// Longest recording a client may request
    #[serde(rename = "max_duration_secs")]
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: f64,

    /// Body limit for `/asr` uploads; derived from the longest allowed clip when unset
    #[serde(rename = "max_upload_bytes")]
    #[serde(default)]
    pub max_upload_bytes: Option<usize>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_audio_dir() -> String {
    "audios".to_string()
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_max_duration_secs() -> f64 {
    60.0
}

impl SystemConfig {
    pub fn audio_dir(&self) -> PathBuf {
        PathBuf::from(&self.audio_dir)
    }

    pub fn index_page(&self) -> PathBuf {
        PathBuf::from(&self.templates_dir).join("index.html")
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            audio_dir: default_audio_dir(),
            templates_dir: default_templates_dir(),
            max_duration_secs: default_max_duration_secs(),
            max_upload_bytes: None,
        }
    }
}
