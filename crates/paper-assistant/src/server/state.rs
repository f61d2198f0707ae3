//! Application state for the paper assistant server

use std::sync::Arc;

use crate::assistant::PaperAssistant;
use crate::config::{AppConfig, LlmBackend};
use crate::error::Result;
use crate::providers::{
    EmbeddingProvider, GeminiClient, LlmProvider, OllamaClient, OllamaEmbedder, OllamaLlm,
};
use crate::storage::{PaperStore, SqlitePaperStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    assistant: PaperAssistant,
}

impl AppState {
    /// Build every collaborator from configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        tracing::info!(
            "Initializing paper assistant (llm backend: {:?})",
            config.llm.backend
        );

        let store: Arc<dyn PaperStore> = Arc::new(SqlitePaperStore::open(&config.database.path)?);
        tracing::info!(
            "Paper store '{}' opened at {}",
            store.name(),
            config.database.path.display()
        );

        let (embedder, llm) = build_providers(&config)?;

        Ok(Self::from_parts(config, embedder, llm, store))
    }

    /// Assemble state from already-built collaborators
    pub fn from_parts(
        config: AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn PaperStore>,
    ) -> Self {
        let assistant = PaperAssistant::new(embedder, llm, store, config.assistant.clone());
        Self {
            inner: Arc::new(AppStateInner { config, assistant }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn assistant(&self) -> &PaperAssistant {
        &self.inner.assistant
    }
}

/// Embedder and LLM for the configured backend.
///
/// When the Ollama LLM runs on the same server as the embedding model, both
/// share one HTTP client.
fn build_providers(
    config: &AppConfig,
) -> Result<(Arc<dyn EmbeddingProvider>, Arc<dyn LlmProvider>)> {
    let ollama = Arc::new(OllamaClient::new(
        &config.embeddings.base_url,
        config.llm.timeout_secs,
        config.llm.max_retries,
    )?);

    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OllamaEmbedder::from_client(
        Arc::clone(&ollama),
        config.embeddings.model.clone(),
        config.embeddings.dimensions,
    ));
    tracing::info!(
        "Embeddings via {} ({}, {} dims)",
        embedder.name(),
        config.embeddings.model,
        embedder.dimensions()
    );

    let llm: Arc<dyn LlmProvider> = match config.llm.backend {
        LlmBackend::Gemini => Arc::new(GeminiClient::new(&config.llm)?),
        LlmBackend::Ollama
            if config.llm.ollama_base_url.trim_end_matches('/')
                == config.embeddings.base_url.trim_end_matches('/') =>
        {
            Arc::new(OllamaLlm::from_client(
                ollama,
                config.llm.ollama_model.clone(),
                config.llm.temperature,
            ))
        }
        LlmBackend::Ollama => Arc::new(OllamaLlm::new(&config.llm)?),
    };
    tracing::info!("LLM provider: {} ({})", llm.name(), llm.model());

    Ok((embedder, llm))
}
