//! Tolerant parser for LLM-generated multiple-choice questions
//!
//! Expected layout per question, blocks separated by a blank line:
//!
//! ```text
//! **1. What does self-attention compute?**
//! A) Pairwise token weights
//! B) Convolution kernels
//! C) Word frequencies
//! D) Parse trees
//! **Answer:** A) Pairwise token weights
//! ```
//!
//! Anything that does not fit is dropped and counted, never an error.

use regex::Regex;
use std::sync::OnceLock;

use crate::types::Mcq;

const ANSWER_MARKER: &str = "Answer:";
const MISSING_ANSWER: &str = "N/A";

/// Parsed questions plus the number of rejected blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct McqParse {
    pub mcqs: Vec<Mcq>,
    pub dropped: usize,
}

fn block_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\*\*[0-5]\.").expect("Invalid regex"))
}

fn question_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s*").expect("Invalid regex"))
}

/// Parse LLM output into MCQ records in input order
pub fn parse_mcqs(text: &str) -> McqParse {
    let mut parse = McqParse::default();

    for block in split_blocks(&normalize(text)) {
        let lines: Vec<&str> = block
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            continue;
        }

        match parse_block(&lines) {
            Some(mcq) => parse.mcqs.push(mcq),
            None => {
                tracing::debug!("Dropping malformed MCQ block starting {:?}", lines[0]);
                parse.dropped += 1;
            }
        }
    }

    if parse.dropped > 0 {
        tracing::warn!(
            "Parsed {} MCQs, dropped {} malformed blocks",
            parse.mcqs.len(),
            parse.dropped
        );
    }

    parse
}

/// CRLF to LF, trim, collapse blank-line runs to one blank line
fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    let mut out: Vec<&str> = Vec::new();
    let mut prev_blank = false;

    for line in unified.trim().lines() {
        let blank = line.trim().is_empty();
        if blank && prev_blank {
            continue;
        }
        out.push(if blank { "" } else { line });
        prev_blank = blank;
    }

    out.join("\n")
}

/// Split where a question marker follows a blank line
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut prev_blank = true;

    for line in text.lines() {
        if prev_blank && block_start().is_match(line.trim_start()) && !current.is_empty() {
            blocks.push(std::mem::take(&mut current));
        }
        prev_blank = line.is_empty();
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_block(lines: &[&str]) -> Option<Mcq> {
    if lines.len() < 6 {
        return None;
    }

    let heading = lines[0].replace("**", "");
    let question = question_number().replace(heading.trim(), "").to_string();

    let options: Vec<String> = lines[1..5].iter().map(|l| l.to_string()).collect();
    let correct_answer = answer_text(lines[5]);

    if correct_answer == MISSING_ANSWER {
        return None;
    }

    Some(Mcq {
        question,
        options,
        correct_answer,
    })
}

/// Text after the `Answer:` marker (possibly empty), or `"N/A"` when the marker is missing
fn answer_text(line: &str) -> String {
    let unwrapped = line.strip_prefix("**").unwrap_or(line);
    match unwrapped.strip_prefix(ANSWER_MARKER) {
        Some(rest) => rest.replace("**", "").trim().to_string(),
        None => MISSING_ANSWER.to_string(),
    }
}
