use std::path::PathBuf;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info, info_span, Instrument};

use crate::asr::transcribe_or_empty;
use crate::audio::AudioError;
use crate::recommendation::RecommendationPayload;
use crate::state::AppState;
use crate::utils::filename::recording_path;

/// Request-level failures. Everything else degrades to an empty payload.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Recording failed")]
    RecordingFailed(#[source] AudioError),

    #[error("Failed to store audio: {0}")]
    Storage(#[from] std::io::Error),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HandlerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            HandlerError::RecordingFailed(_) | HandlerError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn into_http(self) -> (StatusCode, Json<Value>) {
        (self.status(), Json(json!({ "error": self.to_string() })))
    }
}

/// Parse the form's `duration` (seconds); blank means the configured default
pub fn parse_duration(
    raw: Option<&str>,
    default_secs: f64,
    max_secs: f64,
) -> Result<Duration, HandlerError> {
    let secs = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => default_secs,
        Some(s) => s
            .parse::<f64>()
            .map_err(|_| HandlerError::BadRequest(format!("Invalid duration: {}", s)))?,
    };

    if !secs.is_finite() || secs <= 0.0 {
        return Err(HandlerError::BadRequest(format!("Duration must be positive, got {}", secs)));
    }
    if secs > max_secs {
        return Err(HandlerError::BadRequest(format!(
            "Duration {} exceeds the maximum of {} seconds",
            secs, max_secs
        )));
    }

    Ok(Duration::from_secs_f64(secs))
}

async fn new_clip_path(state: &AppState, user: &str) -> Result<PathBuf, HandlerError> {
    let dir = state.config.system_config.audio_dir();
    tokio::fs::create_dir_all(&dir).await?;
    Ok(recording_path(&dir, user, chrono::Utc::now().timestamp()))
}

/// Record from the microphone, transcribe, and recommend
pub async fn record_and_recommend(
    state: &AppState,
    duration: Duration,
    user: &str,
) -> Result<RecommendationPayload, HandlerError> {
    let span = info_span!("record", request_id = %state.generate_request_id(), user = %user);
    async {
        let path = new_clip_path(state, user).await?;

        let recorder = state.recorder.clone();
        let clip = path.clone();
        let recorded = tokio::task::spawn_blocking(move || recorder.record(&clip, duration))
            .await
            .map_err(|e| HandlerError::RecordingFailed(AudioError::Buffer(e.to_string())))?;
        if let Err(e) = recorded {
            error!("Recording error: {}", e);
            return Err(HandlerError::RecordingFailed(e));
        }

        Ok::<_, HandlerError>(transcribe_and_recommend(state, path).await)
    }
    .instrument(span)
    .await
}

/// Store an uploaded clip, transcribe, and recommend
pub async fn upload_and_recommend(
    state: &AppState,
    audio: &[u8],
    user: &str,
) -> Result<RecommendationPayload, HandlerError> {
    if audio.is_empty() {
        return Err(HandlerError::BadRequest("Uploaded audio file is empty".to_string()));
    }

    let span = info_span!("upload", request_id = %state.generate_request_id(), user = %user);
    async {
        let path = new_clip_path(state, user).await?;
        tokio::fs::write(&path, audio).await?;
        info!("Stored upload ({} bytes) at {}", audio.len(), path.display());

        Ok::<_, HandlerError>(transcribe_and_recommend(state, path).await)
    }
    .instrument(span)
    .await
}

/// Recommend straight from text, skipping capture and ASR
pub async fn text_recommend(state: &AppState, text: String) -> RecommendationPayload {
    let span = info_span!("text", request_id = %state.generate_request_id());
    state.pipeline.recommend(text).instrument(span).await
}

async fn transcribe_and_recommend(state: &AppState, path: PathBuf) -> RecommendationPayload {
    let text = transcribe_or_empty(state.asr.as_ref(), &path).await;
    state.pipeline.recommend(text).await
}
