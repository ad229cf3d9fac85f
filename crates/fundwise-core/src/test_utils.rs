//! Test utilities for fundwise-core
//!
//! A mock Ollama server that answers summary prompts with canned JSON, for
//! development and integration tests without a real model.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::ai::prompt::MONTH_SUMMARY_MARKER;

/// Mock Ollama server for testing and development
pub struct MockOllamaServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

/// Fixed reply text, or None to answer based on the prompt
type ReplyOverride = Arc<Option<String>>;

impl MockOllamaServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        Self::spawn(Arc::new(None)).await
    }

    /// Start a server that answers every generate request with `response`
    pub async fn start_with_response(response: &str) -> Self {
        Self::spawn(Arc::new(Some(response.to_string()))).await
    }

    async fn spawn(reply: ReplyOverride) -> Self {
        let app = Router::new()
            .route("/api/tags", get(handle_tags))
            .route("/api/generate", post(handle_generate))
            .with_state(reply);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockOllamaServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Ollama tags endpoint response (health check)
async fn handle_tags() -> Json<TagsResponse> {
    Json(TagsResponse {
        models: vec![ModelInfo {
            name: "llama3.2:latest".to_string(),
            modified_at: "2024-01-01T00:00:00Z".to_string(),
            size: 4_000_000_000,
        }],
    })
}

async fn handle_generate(
    State(reply): State<ReplyOverride>,
    Json(request): Json<GenerateRequest>,
) -> Json<GenerateResponse> {
    let response = match reply.as_ref() {
        Some(fixed) => fixed.clone(),
        None if request.prompt.contains(MONTH_SUMMARY_MARKER) => {
            summary_mock(&request.prompt)
        }
        None => "{}".to_string(),
    };

    Json(GenerateResponse {
        model: request.model,
        response,
        done: true,
    })
}

/// Echo the month and overspent count back so tests can check the prompt
fn summary_mock(prompt: &str) -> String {
    let month = line_value(prompt, "Month: ").unwrap_or("this month");
    let overspent = line_value(prompt, "Funds on track: ")
        .and_then(|line| line.rsplit("overspent: ").next())
        .unwrap_or("0");

    let body = SummaryResponse {
        summary: format!("Here is how {} went.", month),
        highlights: vec![format!("{} fund(s) overspent", overspent)],
    };
    // Models tend to wrap their JSON in chatter
    format!(
        "Sure, here is the summary:\n{}",
        serde_json::to_string(&body).unwrap_or_default()
    )
}

fn line_value<'a>(prompt: &'a str, prefix: &str) -> Option<&'a str> {
    prompt
        .lines()
        .find_map(|line| line.strip_prefix(prefix))
        .map(str::trim)
}

// Request/Response types for the mock server

#[derive(Debug, Serialize)]
struct TagsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    name: String,
    modified_at: String,
    size: u64,
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[allow(dead_code)]
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    model: String,
    response: String,
    done: bool,
}

#[derive(Debug, Serialize)]
struct SummaryResponse {
    summary: String,
    highlights: Vec<String>,
}
