//! Prompt templates for summaries, MCQs and the research chatbot

use super::relevance::Relevance;
use crate::types::RetrievedDocument;

const GUIDELINES: &str = r#"Guidelines for your response:
1. Be concise and answer the query directly
2. Use an academic but accessible tone
3. If there is no relevant information, give a general knowledge answer and say so
4. Structure the response for readability
5. If you cannot answer confidently, explain what further information would be needed
6. Do NOT use Markdown formatting (no asterisks *, bold ** or bullet points)"#;

/// Prompt builder for assistant operations
pub struct PromptBuilder;

impl PromptBuilder {
    /// Short summary of a whole paper
    pub fn summary(content: &str) -> String {
        format!("summarize this: {} in short", content)
    }

    /// Ask for `count` four-option questions in the layout `parse_mcqs` reads
    pub fn mcq(content: &str, count: usize) -> String {
        format!(
            r#"Create {count} MCQ questions with four options each and the correct answer. The questions should be based on the following content: {content}

Format every question exactly like this, with a blank line between questions:

**1. Question text?**
A) first option
B) second option
C) third option
D) fourth option
**Answer:** B) second option"#,
            count = count,
            content = content,
        )
    }

    /// Retrieved contents joined by a blank line
    pub fn build_context(documents: &[RetrievedDocument]) -> String {
        documents
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Chatbot prompt for the given relevance branch
    pub fn chatbot(query: &str, relevance: &Relevance, documents: &[RetrievedDocument]) -> String {
        let context_instruction = match relevance {
            Relevance::Grounded { title } => format!(
                "Here are relevant sections from the paper '{}' to help you answer:\n\n{}",
                title,
                Self::build_context(documents)
            ),
            Relevance::Limited { title } => format!(
                "The paper '{}' mentions concepts related to your query, but only limited excerpts are available:\n\n{}\n\n\
                 These excerpts suggest the paper addresses the topic but do not give enough context for a complete answer. \
                 Provide what insight you can from the available content and fill the gaps with general knowledge.",
                title,
                Self::build_context(documents)
            ),
            Relevance::Unmatched => "No specific information addressing this query was found in the stored papers. \
                 Provide a general knowledge response."
                .to_string(),
        };

        format!(
            r#"You are an expert research assistant specializing in academic papers.

Please provide a clear, accurate, and helpful response to the following query.

User Query: {query}

{context_instruction}

{guidelines}

Your response:"#,
            query = query,
            context_instruction = context_instruction,
            guidelines = GUIDELINES,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<RetrievedDocument> {
        vec![
            RetrievedDocument {
                content: "first excerpt".to_string(),
                title: "paperA".to_string(),
                distance: 0.1,
            },
            RetrievedDocument {
                content: "second excerpt".to_string(),
                title: "paperB".to_string(),
                distance: 0.2,
            },
        ]
    }

    #[test]
    fn test_grounded_prompt_embeds_all_context() {
        let relevance = Relevance::Grounded {
            title: "paperA".to_string(),
        };
        let prompt = PromptBuilder::chatbot("what is attention", &relevance, &docs());
        assert!(prompt.contains("User Query: what is attention"));
        assert!(prompt.contains("relevant sections from the paper 'paperA'"));
        assert!(prompt.contains("first excerpt\n\nsecond excerpt"));
        assert!(prompt.contains("Do NOT use Markdown"));
    }

    #[test]
    fn test_limited_prompt_mentions_limited_excerpts() {
        let relevance = Relevance::Limited {
            title: "paperB".to_string(),
        };
        let prompt = PromptBuilder::chatbot("q", &relevance, &docs());
        assert!(prompt.contains("only limited excerpts"));
        assert!(prompt.contains("second excerpt"));
        assert!(prompt.contains("general knowledge"));
    }

    #[test]
    fn test_unmatched_prompt_has_no_context() {
        let prompt = PromptBuilder::chatbot("q", &Relevance::Unmatched, &docs());
        assert!(prompt.contains("No specific information"));
        assert!(!prompt.contains("first excerpt"));
    }

    #[test]
    fn test_summary_and_mcq_prompts() {
        assert_eq!(PromptBuilder::summary("body"), "summarize this: body in short");
        let mcq = PromptBuilder::mcq("body", 5);
        assert!(mcq.starts_with("Create 5 MCQ questions"));
        assert!(mcq.contains("following content: body"));
        assert!(mcq.contains("**Answer:**"));
    }
}
