//! Keyword relevance and context sufficiency gating for chatbot queries

use crate::types::RetrievedDocument;

/// How retrieved papers relate to a query; decides which prompt is used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relevance {
    /// A paper matched a keyword and the retrieved text is long enough
    Grounded { title: String },
    /// A paper matched a keyword but the retrieved text is short
    Limited { title: String },
    /// No retrieved paper contains any query keyword
    Unmatched,
}

impl Relevance {
    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Relevance::Grounded { .. } => "grounded",
            Relevance::Limited { .. } => "limited",
            Relevance::Unmatched => "unmatched",
        }
    }

    /// Title of the first matching paper, if any
    pub fn title(&self) -> Option<&str> {
        match self {
            Relevance::Grounded { title } | Relevance::Limited { title } => Some(title),
            Relevance::Unmatched => None,
        }
    }
}

/// Lowercased whitespace-separated query terms
pub fn query_keywords(query: &str) -> Vec<String> {
    query.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// Classify retrieved documents against a query.
///
/// Documents are scanned in rank order and scanning stops at the first one
/// whose lowercased content contains any keyword as a substring. Sufficiency
/// counts the characters of every retrieved document, matched or not.
pub fn classify(query: &str, documents: &[RetrievedDocument], min_context_chars: usize) -> Relevance {
    let keywords = query_keywords(query);

    let first_match = documents.iter().find(|doc| {
        let content = doc.content.to_lowercase();
        keywords.iter().any(|k| content.contains(k.as_str()))
    });

    let total_chars: usize = documents.iter().map(RetrievedDocument::char_len).sum();
    let sufficient = total_chars >= min_context_chars;

    match first_match {
        Some(doc) if sufficient => Relevance::Grounded {
            title: doc.title.clone(),
        },
        Some(doc) => Relevance::Limited {
            title: doc.title.clone(),
        },
        None => Relevance::Unmatched,
    }
}

/// Strip Markdown bold/italic markers and surrounding whitespace
pub fn clean_response(text: &str) -> String {
    text.replace("**", "").replace('*', "").trim().to_string()
}
