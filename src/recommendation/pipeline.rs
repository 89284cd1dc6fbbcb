use std::sync::Arc;

use tracing::{debug, error, info};

use super::types::RecommendationPayload;
use crate::books::BookCatalog;
use crate::genre::{extract_genres, KeywordTable};

/// Transcript → genres → books
#[derive(Debug, Clone)]
pub struct RecommendationPipeline {
    keyword_table: Arc<KeywordTable>,
    catalog: Arc<BookCatalog>,
}

impl RecommendationPipeline {
    pub fn new(keyword_table: Arc<KeywordTable>, catalog: Arc<BookCatalog>) -> Self {
        Self {
            keyword_table,
            catalog,
        }
    }

    pub fn catalog(&self) -> &BookCatalog {
        &self.catalog
    }

    /// Build the payload for one transcript. Blocks on the catalog read.
    ///
    /// The catalog is only consulted when at least one genre was detected.
    pub fn recommend_blocking(&self, transcript: String) -> RecommendationPayload {
        if transcript.trim().is_empty() {
            debug!("Empty transcript, skipping genre extraction");
            return RecommendationPayload::empty(transcript);
        }

        let genres = extract_genres(&self.keyword_table, &transcript);
        if genres.is_empty() {
            info!("No genre keywords in transcript");
            return RecommendationPayload::empty(transcript);
        }

        let recommendations = self.catalog.recommend(&genres);
        info!(
            "Detected genres {:?}, {} recommendation(s)",
            genres,
            recommendations.len()
        );

        RecommendationPayload {
            transcription: transcript,
            genres,
            recommendations,
        }
    }

    /// Async wrapper running the catalog read on the blocking pool
    pub async fn recommend(&self, transcript: String) -> RecommendationPayload {
        let pipeline = self.clone();
        let fallback = transcript.clone();
        match tokio::task::spawn_blocking(move || pipeline.recommend_blocking(transcript)).await {
            Ok(payload) => payload,
            Err(e) => {
                error!("Recommendation task failed: {}", e);
                RecommendationPayload::empty(fallback)
            }
        }
    }
}
