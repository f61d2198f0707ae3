//! Paper records and retrieval results

use serde::{Deserialize, Serialize};

/// A stored paper: extracted text, its embedding, and the original file
#[derive(Debug, Clone)]
pub struct PaperRecord {
    /// Title supplied at upload (lookup key)
    pub title: String,
    /// Extracted text content
    pub content: String,
    /// Embedding of the full content
    pub embedding: Vec<f32>,
    /// Original PDF bytes
    pub file: Vec<u8>,
}

impl PaperRecord {
    pub fn new(title: String, content: String, embedding: Vec<f32>, file: Vec<u8>) -> Self {
        Self {
            title,
            content,
            embedding,
            file,
        }
    }
}

/// Content of a paper looked up by title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperContent {
    pub content: String,
    pub title: String,
}

/// A paper returned by similarity search, in rank order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub content: String,
    pub title: String,
    /// Cosine distance to the query embedding (lower is closer)
    pub distance: f32,
}

impl RetrievedDocument {
    /// Number of characters in the content
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
