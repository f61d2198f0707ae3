//! HTTP request and response bodies

use serde::{Deserialize, Serialize};

use super::mcq::Mcq;

/// Body of `POST /summary` and `POST /createMcq`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub title: Option<String>,
}

impl SummaryRequest {
    /// The title if present and non-blank
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Body of `POST /chatbot`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatbotRequest {
    #[serde(default)]
    pub query: Option<String>,
}

impl ChatbotRequest {
    /// The query if present and non-blank
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McqResponse {
    pub title: String,
    pub mcqs: Vec<Mcq>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotResponse {
    pub query: String,
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitlesResponse {
    pub titles: Vec<String>,
}
