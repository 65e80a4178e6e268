//! Mock Vertex AI Imagen backend for integration tests
//!
//! Serves the `:predict` endpoint with canned images or canned failures

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Project the mock accepts
pub const MOCK_PROJECT: &str = "lumen-test";

/// Bearer token the mock accepts
pub const MOCK_TOKEN: &str = "ya29.mock-token";

/// How the mock answers predict requests
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Return `sampleCount` images whose bytes are `image-<n>`
    Succeed,
    /// Reject every prompt with a 400 carrying the policy support code
    RejectPolicy,
    /// Filter every image through the safety system
    ///
    /// The filter reason is only reported when the request asks for it
    /// with `includeRaiReason`; otherwise the predictions are empty.
    FilterAll,
    /// Fail with a 500
    Fail,
}

/// Mock Imagen backend that records what it receives
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockProviderState>,
}

struct MockProviderState {
    behavior: Behavior,
    request_count: AtomicU32,
    prompts: Mutex<Vec<String>>,
    parameters: Mutex<Vec<serde_json::Value>>,
}

impl MockProvider {
    /// Start a mock that returns images
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(Behavior::Succeed).await
    }

    /// Start a mock with the given behavior
    pub async fn start_with(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockProviderState {
            behavior,
            request_count: AtomicU32::new(0),
            prompts: Mutex::new(Vec::new()),
            parameters: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route(
                "/v1/projects/{project}/locations/{location}/publishers/google/models/{model}",
                routing::post(handle_predict),
            )
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

    /// Base URL for configuring the mock as the Vertex endpoint
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of predict requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Prompts received, in order
    pub fn prompts(&self) -> Vec<String> {
        self.state.prompts.lock().unwrap().clone()
    }

    /// `parameters` objects received, in order
    pub fn parameters(&self) -> Vec<serde_json::Value> {
        self.state.parameters.lock().unwrap().clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v1")
}

// -- Wire types matching the Imagen predict format --

#[derive(Debug, Deserialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct PredictInstance {
    prompt: String,
}

async fn handle_predict(
    State(state): State<Arc<MockProviderState>>,
    Path((project, _location, model)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(request): Json<PredictRequest>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    if project != MOCK_PROJECT || !model.ends_with(":predict") {
        return StatusCode::NOT_FOUND.into_response();
    }

    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {MOCK_TOKEN}"));
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if let Some(instance) = request.instances.first() {
        state.prompts.lock().unwrap().push(instance.prompt.clone());
    }
    state.parameters.lock().unwrap().push(request.parameters.clone());

    match state.behavior {
        Behavior::Succeed => {
            let count = request.parameters["sampleCount"].as_u64().unwrap_or(1);
            let predictions: Vec<_> = (0..count)
                .map(|n| {
                    serde_json::json!({
                        "bytesBase64Encoded": STANDARD.encode(format!("image-{n}")),
                        "mimeType": "image/png"
                    })
                })
                .collect();
            Json(serde_json::json!({ "predictions": predictions })).into_response()
        }
        Behavior::RejectPolicy => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": {
                    "code": 400,
                    "message": "Image generation failed with the following error: The prompt could not be submitted. Support codes: 57734940",
                    "status": "INVALID_ARGUMENT"
                }
            })),
        )
            .into_response(),
        Behavior::FilterAll if request.parameters["includeRaiReason"] == true => Json(serde_json::json!({
            "predictions": [{ "raiFilteredReason": "Filtered by the responsible AI safety settings." }]
        }))
        .into_response(),
        Behavior::FilterAll => Json(serde_json::json!({ "predictions": [] })).into_response(),
        Behavior::Fail => (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded").into_response(),
    }
}
