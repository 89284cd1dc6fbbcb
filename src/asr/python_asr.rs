use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::interface::{ASRInterface, AsrError};
use crate::audio::wav;
use crate::python_service::{ASRRequest, PythonServiceClient};

/// ASR client that forwards decoded samples to the Python service
pub struct PythonServiceASR {
    python_service: Arc<PythonServiceClient>,
}

impl PythonServiceASR {
    pub fn new(python_service: Arc<PythonServiceClient>) -> Self {
        Self { python_service }
    }
}

#[async_trait]
impl ASRInterface for PythonServiceASR {
    async fn transcribe_file(&self, audio_path: &Path) -> Result<String, AsrError> {
        let path = audio_path.to_path_buf();
        let (audio_data, sample_rate) =
            tokio::task::spawn_blocking(move || wav::read_wav_mono(&path))
                .await
                .map_err(|e| AsrError::Service(e.to_string()))??;

        debug!("Sending {} samples to {}", audio_data.len(), self.python_service.base_url());

        let request = ASRRequest {
            audio_data,
            sample_rate: Some(sample_rate),
        };
        let response = self
            .python_service
            .transcribe(request)
            .await
            .map_err(|e| AsrError::Service(e.to_string()))?;

        if response.success {
            Ok(response.text)
        } else {
            Err(AsrError::Service(
                response.error.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }

    fn name(&self) -> &str {
        "python_service"
    }
}
