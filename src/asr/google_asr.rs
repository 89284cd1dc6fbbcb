use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::interface::{ASRInterface, AsrError};
use crate::audio::wav;
use crate::config_manager::asr::GoogleASRConfig;

/// Google Cloud Speech-to-Text (`speech:recognize`) client
pub struct GoogleASR {
    client: Client,
    api_key: String,
    language: String,
    endpoint: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RecognizeResponse {
    #[serde(default)]
    pub results: Vec<RecognitionResult>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<RecognitionAlternative>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RecognitionAlternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl RecognizeResponse {
    /// Join the top alternative of every result
    pub fn transcript(&self) -> String {
        self.results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl GoogleASR {
    pub fn new(config: &GoogleASRConfig) -> Result<Self, AsrError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            endpoint: config.endpoint.clone(),
        })
    }

    /// Request body for a LINEAR16 WAV clip
    pub fn request_body(&self, wav_bytes: &[u8], sample_rate: u32) -> serde_json::Value {
        json!({
            "config": {
                "encoding": "LINEAR16",
                "sampleRateHertz": sample_rate,
                "languageCode": self.language,
            },
            "audio": {
                "content": base64::engine::general_purpose::STANDARD.encode(wav_bytes),
            }
        })
    }
}

/// Decode any WAV and re-encode as mono 16-bit PCM, which the API requires
fn load_linear16(path: PathBuf) -> Result<(Vec<u8>, u32), AsrError> {
    let (samples, sample_rate) = wav::read_wav_mono(&path)?;
    let bytes = wav::encode_pcm16_wav(&samples, sample_rate)?;
    Ok((bytes, sample_rate))
}

#[async_trait]
impl ASRInterface for GoogleASR {
    async fn transcribe_file(&self, audio_path: &Path) -> Result<String, AsrError> {
        let path = audio_path.to_path_buf();
        let (wav_bytes, sample_rate) = tokio::task::spawn_blocking(move || load_linear16(path))
            .await
            .map_err(|e| AsrError::Service(e.to_string()))??;

        debug!(
            "Sending {} bytes @ {} Hz to Google speech ({})",
            wav_bytes.len(),
            sample_rate,
            self.language
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_body(&wav_bytes, sample_rate))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AsrError::Service(format!("{}: {}", status, body)));
        }

        let result: RecognizeResponse = response.json().await?;
        Ok(result.transcript())
    }

    fn name(&self) -> &str {
        "google_asr"
    }
}
