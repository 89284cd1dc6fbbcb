//! End-to-end tests for the HTTP routes with stubbed capture and ASR

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use voice_book_recommender::asr::{ASRInterface, AsrError};
use voice_book_recommender::audio::{wav, AudioError, AudioRecorder};
use voice_book_recommender::{routes, AppState, Config};

const BOOKS: &str = "\
Title,Author,genres,Year
Gone Girl,Gillian Flynn,\"thriller, crime\",2012
Pride and Prejudice,Jane Austen,romance,1813
The Da Vinci Code,Dan Brown,Thriller/Mystery,2003
Good Omens,Terry Pratchett,\"fantasy, humor\",1990
";

/// Writes a short silent clip and remembers the requested duration
#[derive(Default)]
struct StubRecorder {
    durations: Mutex<Vec<Duration>>,
}

impl AudioRecorder for StubRecorder {
    fn record(&self, path: &Path, duration: Duration) -> Result<(), AudioError> {
        self.durations.lock().unwrap().push(duration);
        wav::write_pcm16_wav(path, &[0.0; 441], 44100)
    }
}

struct BrokenRecorder;

impl AudioRecorder for BrokenRecorder {
    fn record(&self, _path: &Path, _duration: Duration) -> Result<(), AudioError> {
        Err(AudioError::NoInputDevice)
    }
}

/// Returns a fixed transcript (or a failure) and remembers which files it saw
struct StubAsr {
    reply: Option<&'static str>,
    seen: Mutex<Vec<PathBuf>>,
}

impl StubAsr {
    fn saying(text: &'static str) -> Self {
        Self { reply: Some(text), seen: Mutex::new(Vec::new()) }
    }

    fn failing() -> Self {
        Self { reply: None, seen: Mutex::new(Vec::new()) }
    }
}

#[async_trait]
impl ASRInterface for StubAsr {
    async fn transcribe_file(&self, audio_path: &Path) -> Result<String, AsrError> {
        self.seen.lock().unwrap().push(audio_path.to_path_buf());
        self.reply
            .map(|t| t.to_string())
            .ok_or_else(|| AsrError::Service("speech service unavailable".to_string()))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("books.csv"), BOOKS).unwrap();
        Self { dir }
    }

    fn audio_dir(&self) -> PathBuf {
        self.dir.path().join("audios")
    }

    fn config(&self) -> Config {
        let mut config = Config::default();
        config.system_config.audio_dir = self.audio_dir().to_string_lossy().into_owned();
        config.system_config.templates_dir = self.dir.path().to_string_lossy().into_owned();
        config.catalog_config.books_file = self
            .dir
            .path()
            .join("books.csv")
            .to_string_lossy()
            .into_owned();
        config
    }

    fn state_with(
        &self,
        config: Config,
        recorder: Arc<dyn AudioRecorder>,
        asr: Arc<dyn ASRInterface>,
    ) -> AppState {
        AppState::with_components(config, recorder, asr)
    }

    fn state(&self, recorder: Arc<dyn AudioRecorder>, asr: Arc<dyn ASRInterface>) -> AppState {
        AppState::with_components(self.config(), recorder, asr)
    }

    fn clips(&self) -> Vec<String> {
        match std::fs::read_dir(self.audio_dir()) {
            Ok(entries) => entries
                .flatten()
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = routes::build_app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart(uri: &str, parts: &[(&str, Option<&str>, Vec<u8>)]) -> Request<Body> {
    let boundary = "X-VOICE-BOOKS-BOUNDARY";
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    concat!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        "Content-Type: audio/wav\r\n\r\n",
                    ),
                    name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

fn titles(body: &Value) -> Vec<String> {
    let mut titles: Vec<String> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["Title"].as_str().unwrap().to_string())
        .collect();
    titles.sort();
    titles
}

#[tokio::test]
async fn record_returns_transcript_genres_and_books() {
    let fixture = Fixture::new();
    let recorder = Arc::new(StubRecorder::default());
    let asr = Arc::new(StubAsr::saying("I love a good mystery and thriller"));
    let state = fixture.state(recorder.clone(), asr.clone());

    let (status, body) = send(state, form("/record", "duration=2&user=alice")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transcription"], "I love a good mystery and thriller");
    assert_eq!(body["genres"], json!(["Thriller"]));
    assert_eq!(titles(&body), vec!["Gone Girl", "The Da Vinci Code"]);

    // Every source column comes back; numeric columns as JSON numbers.
    let gone_girl = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["Title"] == "Gone Girl")
        .unwrap();
    assert_eq!(gone_girl["genres"], "thriller, crime");
    assert_eq!(gone_girl["Year"], 2012);

    assert_eq!(*recorder.durations.lock().unwrap(), vec![Duration::from_secs(2)]);
    let clips = fixture.clips();
    assert_eq!(clips.len(), 1);
    assert!(clips[0].starts_with("alice_") && clips[0].ends_with(".wav"));
    assert_eq!(asr.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn record_defaults_duration_and_user() {
    let fixture = Fixture::new();
    let recorder = Arc::new(StubRecorder::default());
    let state = fixture.state(recorder.clone(), Arc::new(StubAsr::saying("a classic")));

    let (status, body) = send(state, form("/record", "")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genres"], json!(["Classic"]));
    assert_eq!(body["recommendations"], json!([]));
    assert_eq!(*recorder.durations.lock().unwrap(), vec![Duration::from_secs(5)]);
    assert!(fixture.clips()[0].starts_with("guest_"));
}

#[tokio::test]
async fn record_failure_is_reported() {
    let fixture = Fixture::new();
    let asr = Arc::new(StubAsr::saying("mystery"));
    let state = fixture.state(Arc::new(BrokenRecorder), asr.clone());

    let (status, body) = send(state, form("/record", "duration=1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Recording failed" }));
    assert!(asr.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_duration_is_rejected() {
    let fixture = Fixture::new();
    let recorder = Arc::new(StubRecorder::default());
    let state = fixture.state(recorder.clone(), Arc::new(StubAsr::saying("mystery")));

    let (status, body) = send(state, form("/record", "duration=forever")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("forever"));
    assert!(recorder.durations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_transcription_yields_empty_payload() {
    let fixture = Fixture::new();
    let state = fixture.state(Arc::new(StubRecorder::default()), Arc::new(StubAsr::failing()));

    let (status, body) = send(state, form("/record", "duration=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "transcription": "", "genres": [], "recommendations": [] })
    );
}

#[tokio::test]
async fn missing_catalog_still_answers() {
    let fixture = Fixture::new();
    std::fs::remove_file(fixture.dir.path().join("books.csv")).unwrap();
    let state = fixture.state(
        Arc::new(StubRecorder::default()),
        Arc::new(StubAsr::saying("a detective story")),
    );

    let (status, body) = send(state, form("/record", "duration=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genres"], json!(["Thriller"]));
    assert_eq!(body["recommendations"], json!([]));
}

#[tokio::test]
async fn text_route_skips_audio() {
    let fixture = Fixture::new();
    let recorder = Arc::new(StubRecorder::default());
    let asr = Arc::new(StubAsr::saying("unused"));
    let state = fixture.state(recorder.clone(), asr.clone());

    let (status, body) = send(
        state,
        json_request("/api/recommend", json!({ "text": "fantasy with humour" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transcription"], "fantasy with humour");
    assert_eq!(body["genres"], json!(["Fiction", "Humor"]));
    assert_eq!(titles(&body), vec!["Good Omens"]);
    assert!(recorder.durations.lock().unwrap().is_empty());
    assert!(asr.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn text_route_with_empty_text() {
    let fixture = Fixture::new();
    let state = fixture.state(Arc::new(StubRecorder::default()), Arc::new(StubAsr::saying("")));

    let (status, body) = send(state, json_request("/api/recommend", json!({ "text": "" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "transcription": "", "genres": [], "recommendations": [] })
    );
}

#[tokio::test]
async fn upload_is_stored_and_transcribed() {
    let fixture = Fixture::new();
    let asr = Arc::new(StubAsr::saying("any romance"));
    let state = fixture.state(Arc::new(StubRecorder::default()), asr.clone());
    let clip = wav::encode_pcm16_wav(&[0.0; 160], 16000).unwrap();

    let (status, body) = send(
        state,
        multipart(
            "/asr",
            &[
                ("user", None, b"bob".to_vec()),
                ("file", Some("clip.wav"), clip.clone()),
            ],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genres"], json!(["Fiction"]));
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 0);

    let seen = asr.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].file_name().unwrap().to_str().unwrap().starts_with("bob_"));
    assert_eq!(std::fs::read(&seen[0]).unwrap(), clip);
}

#[tokio::test]
async fn long_upload_within_max_duration_is_accepted() {
    let fixture = Fixture::new();
    let asr = Arc::new(StubAsr::saying("a crime novel"));
    let state = fixture.state(Arc::new(StubRecorder::default()), asr.clone());
    // 30 s at 44.1 kHz is well past axum's 2 MB default body limit
    let clip = wav::encode_pcm16_wav(&vec![0.0; 44100 * 30], 44100).unwrap();
    assert!(clip.len() > 2 * 1024 * 1024);

    let request = multipart("/asr", &[("file", Some("long.wav"), clip.clone())]);
    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genres"], json!(["Thriller"]));
    assert_eq!(titles(&body), vec!["Gone Girl", "The Da Vinci Code"]);
    let seen = asr.seen.lock().unwrap().clone();
    assert_eq!(std::fs::metadata(&seen[0]).unwrap().len(), clip.len() as u64);
}

#[tokio::test]
async fn upload_over_limit_is_rejected() {
    let fixture = Fixture::new();
    let mut config = fixture.config();
    config.system_config.max_upload_bytes = Some(4096);
    let asr = Arc::new(StubAsr::saying("mystery"));
    let state = fixture.state_with(config, Arc::new(StubRecorder::default()), asr.clone());
    let clip = wav::encode_pcm16_wav(&[0.0; 16000], 16000).unwrap();

    let request = multipart("/asr", &[("file", Some("big.wav"), clip)]);
    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].as_str().unwrap().starts_with("Upload too large"));
    assert!(asr.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn upload_without_file_is_rejected() {
    let fixture = Fixture::new();
    let asr = Arc::new(StubAsr::saying("mystery"));
    let state = fixture.state(Arc::new(StubRecorder::default()), asr);

    let request = multipart("/asr", &[("user", None, b"bob".to_vec())]);
    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No audio file provided" }));
}

#[tokio::test]
async fn health_reports_catalog_and_asr() {
    let fixture = Fixture::new();
    let state = fixture.state(Arc::new(StubRecorder::default()), Arc::new(StubAsr::saying("")));

    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["asr"], "stub");
    assert_eq!(body["catalog"], true);
    assert_eq!(body["python_service"], Value::Null);
}

#[tokio::test]
async fn index_page_is_served() {
    let fixture = Fixture::new();
    std::fs::write(fixture.dir.path().join("index.html"), "<h1>Book finder</h1>").unwrap();
    let state = fixture.state(Arc::new(StubRecorder::default()), Arc::new(StubAsr::saying("")));

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("<h1>Book finder</h1>".to_string()));
}
