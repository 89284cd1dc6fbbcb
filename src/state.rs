use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::asr::{ASRFactory, ASRInterface};
use crate::audio::{AudioRecorder, CpalRecorder};
use crate::books::BookCatalog;
use crate::config_manager::Config;
use crate::genre::KeywordTable;
use crate::python_service::PythonServiceClient;
use crate::recommendation::RecommendationPipeline;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: Arc<RecommendationPipeline>,
    pub recorder: Arc<dyn AudioRecorder>,
    pub asr: Arc<dyn ASRInterface>,
    pub python_service: Option<Arc<PythonServiceClient>>,
}

impl AppState {
    /// Wire up the microphone recorder and the configured ASR backend
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let components = ASRFactory::create_asr(&config.asr_config)?;
        let recorder: Arc<dyn AudioRecorder> =
            Arc::new(CpalRecorder::new(config.audio_config.clone()));

        let mut state = Self::with_components(config, recorder, components.asr);
        state.python_service = components.python_service;
        Ok(state)
    }

    /// Build state around caller-supplied capture and transcription
    pub fn with_components(
        config: Config,
        recorder: Arc<dyn AudioRecorder>,
        asr: Arc<dyn ASRInterface>,
    ) -> Self {
        let keyword_table = Arc::new(KeywordTable::from_config(&config.genre_config));
        let catalog = Arc::new(BookCatalog::from_config(&config.catalog_config));
        info!(
            "Genre table has {} keywords; books file: {}",
            keyword_table.len(),
            catalog.path().display()
        );

        Self {
            config: Arc::new(config),
            pipeline: Arc::new(RecommendationPipeline::new(keyword_table, catalog)),
            recorder,
            asr,
            python_service: None,
        }
    }

    pub fn generate_request_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
