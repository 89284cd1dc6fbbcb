use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use super::google_asr::GoogleASR;
use super::interface::ASRInterface;
use super::python_asr::PythonServiceASR;
use crate::config_manager::asr::{ASRConfig, PythonServiceASRConfig};
use crate::python_service::PythonServiceClient;

/// Factory for creating ASR engines/clients
pub struct ASRFactory;

/// What the factory built: the engine plus the sidecar client when one is used
pub struct ASRComponents {
    pub asr: Arc<dyn ASRInterface>,
    pub python_service: Option<Arc<PythonServiceClient>>,
}

impl ASRFactory {
    /// Create an ASR client based on configuration
    pub fn create_asr(asr_config: &ASRConfig) -> Result<ASRComponents> {
        info!("Initializing ASR engine: {}", asr_config.asr_model);

        match asr_config.asr_model.as_str() {
            "google_asr" => {
                let google = asr_config.google_asr.clone().unwrap_or_default();
                if google.api_key.is_empty() {
                    warn!("google_asr.api_key is empty; transcription requests will be rejected");
                }
                Ok(ASRComponents {
                    asr: Arc::new(GoogleASR::new(&google)?),
                    python_service: None,
                })
            }
            "python_service" => {
                let settings: PythonServiceASRConfig =
                    asr_config.python_service.clone().unwrap_or_default();
                let client = Arc::new(PythonServiceClient::new(settings.base_url));
                Ok(ASRComponents {
                    asr: Arc::new(PythonServiceASR::new(client.clone())),
                    python_service: Some(client),
                })
            }
            other => anyhow::bail!("Unsupported ASR model: {}", other),
        }
    }
}
