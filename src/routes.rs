use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers::{self, HandlerError};
use crate::recommendation::{RecommendationPayload, RecordRequest, TextRecommendRequest};
use crate::state::AppState;

type ApiResult = Result<Json<RecommendationPayload>, (StatusCode, Json<Value>)>;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let system_config = &state.config.system_config;
    let upload_limit = state.config.upload_limit();

    Router::new()
        // Health check
        .route("/api/health", get(health_check))

        // Recommendation routes
        .route("/record", post(record))
        .route(
            "/asr",
            post(transcribe_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/recommend", post(recommend_text))

        // Landing page
        .route_service("/", ServeFile::new(system_config.index_page()))
}

/// Full application router with middleware and state attached
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let python_healthy = match &state.python_service {
        Some(client) => Some(client.health_check().await.unwrap_or(false)),
        None => None,
    };

    Json(json!({
        "status": "ok",
        "asr": state.asr.name(),
        "catalog": state.pipeline.catalog().is_available(),
        "python_service": python_healthy
    }))
}

async fn record(State(state): State<AppState>, Form(form): Form<RecordRequest>) -> ApiResult {
    let audio = &state.config.audio_config;
    let duration = handlers::parse_duration(
        form.duration.as_deref(),
        audio.default_duration_secs,
        state.config.system_config.max_duration_secs,
    )
    .map_err(HandlerError::into_http)?;
    let user = form.user.as_deref().unwrap_or("guest");

    handlers::record_and_recommend(&state, duration, user)
        .await
        .map(Json)
        .map_err(HandlerError::into_http)
}

async fn transcribe_upload(State(state): State<AppState>, mut multipart: Multipart) -> ApiResult {
    let mut audio = None;
    let mut user = String::from("guest");

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Rejected multipart upload: {}", e);
                return Err(upload_error(e).into_http());
            }
        };

        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("file") => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| upload_error(e).into_http())?;
                audio = Some(data);
            }
            Some("user") => {
                if let Ok(text) = field.text().await {
                    user = text;
                }
            }
            _ => {}
        }
    }

    let audio = audio
        .ok_or_else(|| HandlerError::BadRequest("No audio file provided".to_string()).into_http())?;

    handlers::upload_and_recommend(&state, &audio, &user)
        .await
        .map(Json)
        .map_err(HandlerError::into_http)
}

fn upload_error(e: MultipartError) -> HandlerError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        HandlerError::PayloadTooLarge(e.body_text())
    } else {
        HandlerError::BadRequest(format!("Malformed upload: {}", e))
    }
}

async fn recommend_text(
    State(state): State<AppState>,
    Json(payload): Json<TextRecommendRequest>,
) -> Json<RecommendationPayload> {
    Json(handlers::text_recommend(&state, payload.text).await)
}
