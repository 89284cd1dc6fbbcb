use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config_manager::asr::ASRConfig;
use crate::config_manager::audio::AudioConfig;
use crate::config_manager::catalog::CatalogConfig;
use crate::config_manager::genre::GenreConfig;
use crate::config_manager::system::SystemConfig;

/// Room for multipart framing around an uploaded clip
const UPLOAD_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Main configuration for the application (JSON-LD, JSON or YAML)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "@context")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub context: Option<serde_json::Value>,

    #[serde(rename = "system_config")]
    #[serde(default)]
    pub system_config: SystemConfig,

    #[serde(rename = "audio_config")]
    #[serde(default)]
    pub audio_config: AudioConfig,

    #[serde(rename = "asr_config")]
    #[serde(default)]
    pub asr_config: ASRConfig,

    #[serde(rename = "catalog_config")]
    #[serde(default)]
    pub catalog_config: CatalogConfig,

    #[serde(rename = "genre_config")]
    #[serde(default)]
    pub genre_config: GenreConfig,
}

impl Config {
    /// Load configuration, picking the parser from the file extension
    pub fn load(path: &str) -> anyhow::Result<Self> {
        use crate::config_manager::utils::{read_jsonld, read_yaml, validate_config};

        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".yaml") || path_lower.ends_with(".yml") {
            read_yaml(path)
        } else {
            let json_value = read_jsonld(path)?;
            validate_config(&json_value)
        }
    }

    /// Try the usual config locations in order, falling back to defaults.
    ///
    /// Returns the loaded config and the path it came from, if any.
    pub fn discover() -> anyhow::Result<(Self, Option<String>)> {
        for path in candidate_paths() {
            if !Path::new(&path).exists() {
                debug!("No config at {}", path);
                continue;
            }
            let config = Self::load(&path)?;
            return Ok((config, Some(path)));
        }

        info!("No configuration file found, using built-in defaults");
        Ok((Self::default(), None))
    }

    /// Largest `/asr` request body accepted.
    ///
    /// Without an explicit `max_upload_bytes` this fits the longest allowed
    /// clip as 16-bit PCM at the configured rate and channel count.
    pub fn upload_limit(&self) -> usize {
        if let Some(bytes) = self.system_config.max_upload_bytes {
            return bytes;
        }
        let samples = self.system_config.max_duration_secs.max(0.0)
            * self.audio_config.sample_rate as f64
            * self.audio_config.channels.max(1) as f64;
        (samples * 2.0).ceil() as usize + UPLOAD_OVERHEAD_BYTES
    }
}

fn candidate_paths() -> Vec<String> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.jsonld".to_string()),
        Some("conf.json".to_string()),
        Some("conf.yaml".to_string()),
        exe_dir.join("conf.jsonld").to_str().map(|s| s.to_string()),
        exe_dir.join("conf.yaml").to_str().map(|s| s.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect()
}
