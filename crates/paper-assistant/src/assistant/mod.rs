//! Paper assistant: upload, summaries, MCQs and retrieval-augmented answers
//!
//! `PaperAssistant` owns the three collaborators (embedder, LLM, store) behind
//! trait objects and runs each operation as one sequential chain.

pub mod mcq;
pub mod prompt;
pub mod relevance;

use std::sync::Arc;

use crate::config::AssistantConfig;
use crate::error::{Error, Result};
use crate::ingestion::PdfExtractor;
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::storage::PaperStore;
use crate::types::{PaperContent, PaperRecord, RetrievedDocument};

pub use mcq::{parse_mcqs, McqParse};
pub use prompt::PromptBuilder;
pub use relevance::{classify, clean_response, Relevance};

/// Reply used when the LLM cannot answer a chatbot query
pub const APOLOGY: &str = "Sorry, I couldn't process your query.";

/// Result of summarizing a paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Summary(String),
    /// No paper with that title
    NoContent,
}

/// Result of generating MCQs for a paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McqOutcome {
    Generated(McqParse),
    /// No paper with that title
    NoContent,
}

/// Chatbot answer with the classification that shaped its prompt
#[derive(Debug, Clone)]
pub struct QueryAnswer {
    /// Cleaned LLM reply, or the apology when generation failed
    pub response: String,
    pub relevance: Relevance,
    pub documents_retrieved: usize,
}

/// Collaborator health for readiness probes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthReport {
    pub store: bool,
    pub embedder: bool,
    pub llm: bool,
}

impl HealthReport {
    pub fn is_ready(&self) -> bool {
        self.store && self.embedder && self.llm
    }
}

/// The research-paper assistant
pub struct PaperAssistant {
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn PaperStore>,
    extractor: Arc<PdfExtractor>,
    config: AssistantConfig,
}

impl PaperAssistant {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn PaperStore>,
        config: AssistantConfig,
    ) -> Self {
        Self {
            embedder,
            llm,
            store,
            extractor: Arc::new(PdfExtractor::default()),
            config,
        }
    }

    /// Extract, embed and store an uploaded PDF
    pub async fn upload(&self, title: &str, file: Vec<u8>) -> Result<()> {
        if title.trim().is_empty() || file.is_empty() {
            return Err(Error::validation("Title and file are required"));
        }

        let extractor = Arc::clone(&self.extractor);
        let (content, pages, file) = tokio::task::spawn_blocking(move || {
            let text = extractor.extract(&file)?;
            let pages = PdfExtractor::page_count(&file);
            Ok::<_, Error>((text, pages, file))
        })
        .await
        .map_err(|e| Error::internal(format!("Task join error: {}", e)))??;

        tracing::info!(
            "Extracted {} chars from '{}' ({} bytes, {} pages)",
            content.chars().count(),
            title,
            file.len(),
            pages.map_or_else(|| "unknown".to_string(), |n| n.to_string())
        );

        let embedding = self.embedder.embed(&content).await?;
        let record = PaperRecord::new(title.to_string(), content, embedding, file);
        self.store.insert_paper(&record).await?;

        tracing::info!("Stored paper '{}'", title);
        Ok(())
    }

    /// Exact title lookup of a paper's text
    pub async fn content(&self, title: &str) -> Result<Option<PaperContent>> {
        self.store.get_content(title).await
    }

    /// Original PDF bytes for a title
    pub async fn paper_file(&self, title: &str) -> Result<Option<Vec<u8>>> {
        self.store.get_file(title).await
    }

    /// Distinct stored titles
    pub async fn titles(&self) -> Result<Vec<String>> {
        self.store.list_titles().await
    }

    pub async fn paper_count(&self) -> Result<usize> {
        self.store.count().await
    }

    /// Summarize the paper stored under `title`
    pub async fn summarize(&self, title: &str) -> Result<SummaryOutcome> {
        let Some(paper) = self.content(title).await? else {
            tracing::info!("No content for '{}', skipping summary", title);
            return Ok(SummaryOutcome::NoContent);
        };

        let summary = self
            .llm
            .generate(&PromptBuilder::summary(&paper.content))
            .await?;

        tracing::debug!("Summary for '{}': {} chars", title, summary.len());
        Ok(SummaryOutcome::Summary(summary.trim().to_string()))
    }

    /// Generate and parse multiple-choice questions for `title`
    pub async fn generate_mcqs(&self, title: &str) -> Result<McqOutcome> {
        let Some(paper) = self.content(title).await? else {
            tracing::info!("No content for '{}', skipping MCQs", title);
            return Ok(McqOutcome::NoContent);
        };

        let raw = self
            .llm
            .generate(&PromptBuilder::mcq(&paper.content, self.config.mcq_count))
            .await?;

        let parse = parse_mcqs(&raw);
        tracing::info!(
            "Generated {} MCQs for '{}' ({} dropped)",
            parse.mcqs.len(),
            title,
            parse.dropped
        );
        Ok(McqOutcome::Generated(parse))
    }

    /// Answer a free-form question across every stored paper
    pub async fn answer_query(&self, query: &str) -> Result<QueryAnswer> {
        if query.trim().is_empty() {
            return Err(Error::validation("Query is required"));
        }

        let documents = self.retrieve(query).await;
        let relevance = classify(query, &documents, self.config.min_context_chars);
        tracing::info!(
            "Query classified as {} ({} documents, match: {:?})",
            relevance.label(),
            documents.len(),
            relevance.title()
        );

        let prompt = PromptBuilder::chatbot(query, &relevance, &documents);
        let response = match self.llm.generate(&prompt).await {
            Ok(text) => clean_response(&text),
            Err(e) => {
                tracing::error!("Chatbot generation failed: {}", e);
                APOLOGY.to_string()
            }
        };

        Ok(QueryAnswer {
            response,
            relevance,
            documents_retrieved: documents.len(),
        })
    }

    /// Nearest papers for a query; failures degrade to no documents
    async fn retrieve(&self, query: &str) -> Vec<RetrievedDocument> {
        let embedding = match self.embedder.embed(query).await {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("Query embedding failed, answering without context: {}", e);
                return Vec::new();
            }
        };

        match self.store.search(&embedding, self.config.top_k).await {
            Ok(docs) => {
                tracing::debug!("Retrieved {} documents", docs.len());
                docs
            }
            Err(e) => {
                tracing::warn!("Retrieval failed, answering without context: {}", e);
                Vec::new()
            }
        }
    }

    /// Health of each collaborator; errors count as unhealthy
    pub async fn health(&self) -> HealthReport {
        let (store, embedder, llm) = tokio::join!(
            self.store.health_check(),
            self.embedder.health_check(),
            self.llm.health_check(),
        );

        HealthReport {
            store: store.unwrap_or(false),
            embedder: embedder.unwrap_or(false),
            llm: llm.unwrap_or(false),
        }
    }
}
