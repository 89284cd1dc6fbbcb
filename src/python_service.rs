use serde::{Deserialize, Serialize};
use anyhow::Result;
use reqwest::Client;

/// Client for the Python speech sidecar
#[derive(Debug, Clone)]
pub struct PythonServiceClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ASRRequest {
    pub audio_data: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ASRResponse {
    #[serde(default)]
    pub text: String,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl PythonServiceClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn transcribe(&self, request: ASRRequest) -> Result<ASRResponse> {
        let url = format!("{}/asr/transcribe", self.base_url);
        let response = self.client.post(&url).json(&request).send().await?;
        let result: ASRResponse = response.error_for_status()?.json().await?;
        Ok(result)
    }

    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}
