//! Paper persistence and similarity search
//!
//! `PaperDb` is the synchronous SQLite layer; `SqlitePaperStore` adapts it to
//! the async `PaperStore` trait the assistant depends on.

mod database;
mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{PaperContent, PaperRecord, RetrievedDocument};

pub use database::{cosine_distance, PaperDb};
pub use sqlite::SqlitePaperStore;

/// Trait for paper storage and nearest-neighbour retrieval
#[async_trait]
pub trait PaperStore: Send + Sync {
    /// Persist a paper
    async fn insert_paper(&self, paper: &PaperRecord) -> Result<()>;

    /// Exact title lookup of a paper's text
    async fn get_content(&self, title: &str) -> Result<Option<PaperContent>>;

    /// Exact title lookup of the stored PDF bytes
    async fn get_file(&self, title: &str) -> Result<Option<Vec<u8>>>;

    /// Papers ranked by cosine distance to `query_embedding`, closest first
    async fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedDocument>>;

    /// Distinct titles in upload order
    async fn list_titles(&self) -> Result<Vec<String>>;

    /// Number of stored papers
    async fn count(&self) -> Result<usize>;

    /// Check if the store is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get store name for logging
    fn name(&self) -> &str;
}
