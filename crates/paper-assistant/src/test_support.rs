//! Test doubles shared by unit tests

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::storage::PaperStore;
use crate::types::{PaperContent, PaperRecord, RetrievedDocument};

/// Embeds text as letter frequencies, so similar wording lands close together
pub struct LetterEmbedder;

#[async_trait]
impl EmbeddingProvider for LetterEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(Error::embedding("Text cannot be empty for embeddings generation"));
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
        "letters"
    }
}

/// Embedder that always fails
pub struct BrokenEmbedder;

#[async_trait]
impl EmbeddingProvider for BrokenEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(Error::embedding("model unavailable"))
    }

    fn dimensions(&self) -> usize {
        26
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(false)
    }

    fn name(&self) -> &str {
        "broken"
    }
}

/// LLM returning a fixed reply (or failing) and recording every prompt
pub struct ScriptedLlm {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts.lock().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| Error::llm("Generation failed: HTTP 503"))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.reply.is_some())
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }
}

/// Store whose every call fails like an unreachable database
pub struct UnreachableStore;

#[async_trait]
impl PaperStore for UnreachableStore {
    async fn insert_paper(&self, _paper: &PaperRecord) -> Result<()> {
        Err(Error::database("connection refused"))
    }

    async fn get_content(&self, _title: &str) -> Result<Option<PaperContent>> {
        Err(Error::database("connection refused"))
    }

    async fn get_file(&self, _title: &str) -> Result<Option<Vec<u8>>> {
        Err(Error::database("connection refused"))
    }

    async fn search(&self, _query: &[f32], _top_k: usize) -> Result<Vec<RetrievedDocument>> {
        Err(Error::database("connection refused"))
    }

    async fn list_titles(&self) -> Result<Vec<String>> {
        Err(Error::database("connection refused"))
    }

    async fn count(&self) -> Result<usize> {
        Err(Error::database("connection refused"))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(false)
    }

    fn name(&self) -> &str {
        "unreachable"
    }
}

#[path = "../tests/common/pdf.rs"]
mod pdf;

pub use pdf::sample_pdf;
