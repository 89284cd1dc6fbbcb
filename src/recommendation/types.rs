use serde::{Deserialize, Serialize};

use crate::books::BookRecord;

/// Response body for every recommendation route
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationPayload {
    pub transcription: String,
    pub genres: Vec<String>,
    pub recommendations: Vec<BookRecord>,
}

impl RecommendationPayload {
    pub fn empty(transcription: String) -> Self {
        Self {
            transcription,
            ..Self::default()
        }
    }
}

/// Form fields accepted by `/record`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordRequest {
    /// Seconds, as sent by the browser form
    pub duration: Option<String>,
    pub user: Option<String>,
}

/// JSON body accepted by `/api/recommend`
#[derive(Debug, Clone, Deserialize)]
pub struct TextRecommendRequest {
    #[serde(default)]
    pub text: String,
}
