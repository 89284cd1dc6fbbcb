use serde::{Deserialize, Serialize};

/// Configuration for Google Cloud Speech-to-Text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleASRConfig {
    #[serde(rename = "api_key")]
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_google_endpoint")]
    pub endpoint: String,

    #[serde(rename = "timeout_secs")]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_google_endpoint() -> String {
    "https://speech.googleapis.com/v1/speech:recognize".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GoogleASRConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_language(),
            endpoint: default_google_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration for the Python ASR sidecar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PythonServiceASRConfig {
    #[serde(rename = "base_url")]
    #[serde(default = "default_python_service_url")]
    pub base_url: String,
}

fn default_python_service_url() -> String {
    std::env::var("PYTHON_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

impl Default for PythonServiceASRConfig {
    fn default() -> Self {
        Self {
            base_url: default_python_service_url(),
        }
    }
}

/// Configuration for Automatic Speech Recognition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ASRConfig {
    #[serde(rename = "asr_model")]
    #[serde(default = "default_asr_model")]
    pub asr_model: String,

    #[serde(rename = "google_asr")]
    pub google_asr: Option<GoogleASRConfig>,

    #[serde(rename = "python_service")]
    pub python_service: Option<PythonServiceASRConfig>,
}

fn default_asr_model() -> String {
    "google_asr".to_string()
}

impl Default for ASRConfig {
    fn default() -> Self {
        Self {
            asr_model: default_asr_model(),
            google_asr: Some(GoogleASRConfig::default()),
            python_service: None,
        }
    }
}
