//! paper-assistant: research-paper assistant with summaries, MCQs and a RAG chatbot
//!
//! Uploaded PDFs are converted to text, embedded, and stored in SQLite. Three
//! derived operations run on top of the store: summarization of a single paper,
//! multiple-choice-question generation, and a retrieval-augmented chatbot that
//! answers questions across every stored paper.

pub mod assistant;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod storage;
pub mod types;

#[cfg(test)]
mod test_support;

pub use assistant::{McqOutcome, PaperAssistant, QueryAnswer, SummaryOutcome};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{
    mcq::Mcq,
    paper::{PaperContent, PaperRecord, RetrievedDocument},
};
