//! End-to-end tests driving the axum router with in-process collaborators

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

use common::sample_pdf;

use paper_assistant::{
    config::AppConfig,
    providers::{EmbeddingProvider, LlmProvider},
    server::{router, state::AppState},
    storage::SqlitePaperStore,
    Error, Result,
};

struct CharEmbedder;

#[async_trait]
impl EmbeddingProvider for CharEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(Error::embedding("empty"));
        }
        let mut v = vec![0.0f32; 26];
        for c in text.to_lowercase().chars().filter(|c| c.is_ascii_lowercase()) {
            v[(c as u8 - b'a') as usize] += 1.0;
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        26
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "chars"
    }
}

/// Replies by prompt kind and remembers what it was asked
struct FakeLlm {
    prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    fn new() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        if prompt.starts_with("summarize this:") {
            Ok("A paper about attention.".to_string())
        } else if prompt.starts_with("Create") {
            Ok((1..=5)
                .map(|n| format!("**{n}. Q{n}?**\nA) a\nB) b\nC) c\nD) d\n**Answer:** C) c"))
                .collect::<Vec<_>>()
                .join("\n\n"))
        } else {
            Ok("**Attention** weighs *tokens*.".to_string())
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-1"
    }
}

fn app() -> (Router, Arc<FakeLlm>) {
    let llm = Arc::new(FakeLlm::new());
    let state = AppState::from_parts(
        AppConfig::default(),
        Arc::new(CharEmbedder),
        llm.clone(),
        Arc::new(SqlitePaperStore::in_memory().unwrap()),
    );
    (router(state), llm)
}

const BOUNDARY: &str = "paper-assistant-test-boundary";

fn multipart_body(title: Option<&str>, file: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(title) = title {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\n{title}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"paper.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(title: Option<&str>, file: Option<&[u8]>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(title, file)))
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

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn upload_then_summary_mcq_and_titles() {
    let (app, llm) = app();
    let pdf = sample_pdf("Attention mechanisms weigh every token");

    let (status, body) = send_json(&app, upload_request(Some("paperA"), Some(&pdf))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "PDF uploaded and stored successfully");

    let (status, body) = send_json(&app, json_request("/summary", json!({"title": "paperA"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "paperA");
    assert_eq!(body["summary"], "A paper about attention.");
    assert!(llm.last_prompt().contains("Attention mechanisms"));

    let (status, body) = send_json(&app, json_request("/createMcq", json!({"title": "paperA"}))).await;
    assert_eq!(status, StatusCode::OK);
    let mcqs = body["mcqs"].as_array().unwrap();
    assert_eq!(mcqs.len(), 5);
    assert_eq!(mcqs[0]["question"], "Q1?");
    assert_eq!(mcqs[0]["options"].as_array().unwrap().len(), 4);
    assert_eq!(mcqs[0]["correct_answer"], "C) c");

    let (status, body) = send_json(&app, get_request("/fetch-titles")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["titles"], json!(["paperA"]));

    let (status, bytes) = send(&app, get_request("/paper/paperA/pdf")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, pdf);
}

#[tokio::test]
async fn upload_requires_title_and_file() {
    let (app, _) = app();
    let pdf = sample_pdf("text");

    let (status, body) = send_json(&app, upload_request(None, Some(&pdf))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title and file are required");

    let (status, _) = send_json(&app, upload_request(Some("t"), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_of_unreadable_pdf_is_server_error() {
    let (app, _) = app();
    let (status, body) = send_json(&app, upload_request(Some("junk"), Some(b"not a pdf"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to extract text from PDF"));
}

#[tokio::test]
async fn summary_validation_and_missing_paper() {
    let (app, _) = app();

    let (status, body) = send_json(&app, json_request("/summary", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");

    let (status, body) = send_json(&app, json_request("/summary", json!({"title": "ghost"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "");

    let (status, body) = send_json(&app, json_request("/createMcq", json!({"title": "ghost"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mcqs"], json!([]));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/chatbot")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn chatbot_answers_and_cleans_markdown() {
    let (app, llm) = app();
    let pdf = sample_pdf("Attention mechanisms weigh every token in the input sequence");
    let (status, _) = send(&app, upload_request(Some("paperA"), Some(&pdf))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        send_json(&app, json_request("/chatbot", json!({"query": "how does attention work"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "how does attention work");
    assert_eq!(body["response"], "Attention weighs tokens.");
    assert!(llm.last_prompt().contains("'paperA'"));
}

#[tokio::test]
async fn chatbot_without_papers_uses_general_knowledge() {
    let (app, llm) = app();
    let (status, _) = send_json(&app, json_request("/chatbot", json!({"query": "what is entropy"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(llm.last_prompt().contains("No specific information"));

    let (status, body) = send_json(&app, json_request("/chatbot", json!({"query": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Query is required");
}

#[tokio::test]
async fn missing_pdf_is_not_found() {
    let (app, _) = app();
    let (status, body) = send_json(&app, get_request("/paper/ghost/pdf")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn health_and_readiness() {
    let (app, _) = app();
    let (status, bytes) = send(&app, get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"OK");

    let (status, _) = send(&app, get_request("/ready")).await;
    assert_eq!(status, StatusCode::OK);
}
