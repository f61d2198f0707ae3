//! Multiple-choice question records

use serde::{Deserialize, Serialize};

/// A parsed multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    /// Question text without numbering or emphasis markers
    pub question: String,
    /// The four option lines, in order
    pub options: Vec<String>,
    /// Answer text following the `Answer:` marker
    pub correct_answer: String,
}
