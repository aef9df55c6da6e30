//! Mock upstream APIs for integration tests
//!
//! One axum server plays every collaborator Posecast talks to: ElevenLabs
//! under `/v1/text-to-speech`, OpenAI under `/v1/chat/completions`, fal's
//! synchronous endpoints under `/fal` and fal's queue under `/queue`.
//! Behaviour is steered by trigger words in the request bodies.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use super::config::TEST_KEY;

/// Dialogue text that makes the speech mock answer 503
pub const BUSY_TEXT: &str = "busy";

/// Dialogue text that makes the speech mock answer 422
pub const REJECTED_TEXT: &str = "rejected";

/// Podcast description that makes the completion mock answer prose
pub const UNPARSABLE_TOPIC: &str = "unparsable";

/// Image URL whose video job never finishes
pub const STUCK_IMAGE: &str = "https://cdn.test/stuck.png";

pub const CHARACTER_IMAGE: &str = "https://cdn.test/character.png";
pub const STUDIO_IMAGE: &str = "https://cdn.test/studio.png";
pub const VIDEO_URL: &str = "https://cdn.test/video.mp4";

/// Size of every synthesized clip
pub const AUDIO_LEN: usize = 5000;

pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

#[derive(Default)]
struct MockState {
    tts_count: AtomicU32,
    completion_count: AtomicU32,
    image_count: AtomicU32,
    transform_count: AtomicU32,
    status_polls: AtomicU32,
    last_transform: std::sync::Mutex<Option<Value>>,
}

impl MockUpstream {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/v1/text-to-speech/{voice}", routing::post(handle_speech))
            .route("/v1/chat/completions", routing::post(handle_completion))
            .route("/fal/fal-ai/flux/dev", routing::post(handle_image))
            .route("/fal/fal-ai/flux-pro/kontext/max/multi", routing::post(handle_transform))
            .route("/queue/fal-ai/ai-avatar", routing::post(handle_submit))
            .route("/queue/fal-ai/ai-avatar/requests/{id}/status", routing::get(handle_status))
            .route("/queue/fal-ai/ai-avatar/requests/{id}", routing::get(handle_result))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for the speech and completion APIs
    pub fn v1_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Base URL for fal's synchronous endpoints
    pub fn fal_url(&self) -> String {
        format!("http://{}/fal", self.addr)
    }

    /// Base URL for fal's queue
    pub fn queue_url(&self) -> String {
        format!("http://{}/queue", self.addr)
    }

    pub fn tts_count(&self) -> u32 {
        self.state.tts_count.load(Ordering::Relaxed)
    }

    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    pub fn image_count(&self) -> u32 {
        self.state.image_count.load(Ordering::Relaxed)
    }

    pub fn transform_count(&self) -> u32 {
        self.state.transform_count.load(Ordering::Relaxed)
    }

    pub fn status_polls(&self) -> u32 {
        self.state.status_polls.load(Ordering::Relaxed)
    }

    /// Body of the most recent transform request
    pub fn last_transform(&self) -> Option<Value> {
        self.state.last_transform.lock().ok().and_then(|body| body.clone())
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Deterministic clip content derived from the spoken text
pub fn audio_for(text: &str) -> Vec<u8> {
    text.bytes().cycle().take(AUDIO_LEN).collect()
}

fn authorized(headers: &HeaderMap, name: &str, expected: &str) -> bool {
    headers.get(name).and_then(|value| value.to_str().ok()) == Some(expected)
}

async fn handle_speech(
    State(state): State<Arc<MockState>>,
    Path(_voice): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.tts_count.fetch_add(1, Ordering::Relaxed);

    if !authorized(&headers, "xi-api-key", TEST_KEY) {
        return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
    }

    let text = body["text"].as_str().unwrap_or_default();

    match text {
        BUSY_TEXT => (StatusCode::SERVICE_UNAVAILABLE, "voice is busy").into_response(),
        REJECTED_TEXT => (StatusCode::UNPROCESSABLE_ENTITY, "text rejected").into_response(),
        _ => ([("content-type", "audio/mpeg")], audio_for(text)).into_response(),
    }
}

async fn handle_completion(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.completion_count.fetch_add(1, Ordering::Relaxed);

    if !authorized(&headers, "authorization", &format!("Bearer {TEST_KEY}")) {
        return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
    }

    let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();

    let content = if prompt.contains(UNPARSABLE_TOPIC) {
        "Sorry, I cannot write that podcast.".to_owned()
    } else {
        json!({
            "dialogues": [
                { "character": 1, "text": "Welcome to the show." },
                { "character": 2, "text": "Glad to be here." }
            ]
        })
        .to_string()
    };

    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

async fn handle_image(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.image_count.fetch_add(1, Ordering::Relaxed);

    if !authorized(&headers, "authorization", &format!("Key {TEST_KEY}")) {
        return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
    }

    Json(json!({
        "images": [{ "url": CHARACTER_IMAGE, "width": 768, "height": 1024, "content_type": "image/png" }],
        "seed": 42
    }))
    .into_response()
}

async fn handle_transform(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> impl IntoResponse {
    state.transform_count.fetch_add(1, Ordering::Relaxed);

    if let Ok(mut last) = state.last_transform.lock() {
        *last = Some(body);
    }

    Json(json!({
        "images": [{ "url": STUDIO_IMAGE }],
        "prompt": "studio"
    }))
}

async fn handle_submit(Json(body): Json<Value>) -> impl IntoResponse {
    let request_id = if body["image_url"] == STUCK_IMAGE { "stuck" } else { "job-1" };

    Json(json!({ "request_id": request_id }))
}

async fn handle_status(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> impl IntoResponse {
    let polls = state.status_polls.fetch_add(1, Ordering::Relaxed);

    if id == "stuck" {
        return Json(json!({ "status": "IN_PROGRESS", "logs": [{ "message": "rendering" }] }));
    }

    if polls == 0 {
        Json(json!({ "status": "IN_QUEUE", "queue_position": 0 }))
    } else {
        Json(json!({ "status": "COMPLETED" }))
    }
}

async fn handle_result(Path(_id): Path<String>) -> impl IntoResponse {
    Json(json!({ "video": { "url": VIDEO_URL } }))
}
