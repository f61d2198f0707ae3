//! Async `PaperStore` over the blocking SQLite database

use async_trait::async_trait;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{PaperContent, PaperRecord, RetrievedDocument};

use super::database::PaperDb;
use super::PaperStore;

/// Paper store backed by SQLite; every call runs on the blocking pool
#[derive(Clone)]
pub struct SqlitePaperStore {
    db: PaperDb,
}

impl SqlitePaperStore {
    /// Create from existing database handle
    pub fn new(db: PaperDb) -> Self {
        Self { db }
    }

    /// Open (or create) the database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(PaperDb::open(path)?))
    }

    /// In-memory store, used by tests and demos
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(PaperDb::in_memory()?))
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(PaperDb) -> Result<T> + Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(db))
            .await
            .map_err(|e| Error::internal(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl PaperStore for SqlitePaperStore {
    async fn insert_paper(&self, paper: &PaperRecord) -> Result<()> {
        let paper = paper.clone();
        self.blocking(move |db| db.insert_paper(&paper)).await
    }

    async fn get_content(&self, title: &str) -> Result<Option<PaperContent>> {
        let title = title.to_string();
        self.blocking(move |db| db.get_content(&title)).await
    }

    async fn get_file(&self, title: &str) -> Result<Option<Vec<u8>>> {
        let title = title.to_string();
        self.blocking(move |db| db.get_file(&title)).await
    }

    async fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedDocument>> {
        let query = query_embedding.to_vec();
        self.blocking(move |db| db.search(&query, top_k)).await
    }

    async fn list_titles(&self) -> Result<Vec<String>> {
        self.blocking(|db| db.list_titles()).await
    }

    async fn count(&self) -> Result<usize> {
        self.blocking(|db| db.count()).await
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.blocking(|db| db.ping()).await.is_ok())
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
