//! Provider abstractions for embeddings and text generation
//!
//! The assistant depends only on these traits, so Gemini and Ollama backends
//! (or test doubles) can be swapped without touching the query pipeline.

pub mod embedding;
pub mod gemini;
pub mod llm;
pub mod ollama;
mod retry;

pub use embedding::EmbeddingProvider;
pub use gemini::GeminiClient;
pub use llm::LlmProvider;
pub use ollama::{OllamaClient, OllamaEmbedder, OllamaLlm};
