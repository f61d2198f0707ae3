//! PDF text extraction
//!
//! `pdf-extract` does the heavy lifting; when it fails, hangs, or panics the
//! extractor falls back to scanning content streams with `lopdf` directly.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};

/// Message returned when a PDF yields no usable text
pub const EMPTY_PDF_MESSAGE: &str = "Failed to extract text from PDF";

/// Glyph names some PDF fonts leak into extracted text
const GLYPH_NAMES: &[(&str, &str)] = &[
    ("uni2010", "-"),
    ("uni2013", "-"),
    ("uni2014", "--"),
    ("uni2019", "'"),
    ("uni201C", "\""),
    ("uni201D", "\""),
    ("uni00A0", " "),
    ("f_f_i", "ffi"),
    ("f_f_l", "ffl"),
    ("f_i", "fi"),
    ("f_l", "fl"),
    ("f_f", "ff"),
];

/// Typographic characters folded to ASCII so keyword matching sees plain text
const CHAR_FOLDS: &[(char, &str)] = &[
    ('\u{2010}', "-"),
    ('\u{2011}', "-"),
    ('\u{2013}', "-"),
    ('\u{2014}', "--"),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2022}', "* "),
    ('\u{2026}', "..."),
    ('\u{00A0}', " "),
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
];

/// PDF text extractor
pub struct PdfExtractor {
    timeout: Duration,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl PdfExtractor {
    /// Create an extractor that gives `pdf-extract` at most `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Extract cleaned text from PDF bytes
    ///
    /// Blocking; call from `spawn_blocking` inside async code.
    pub fn extract(&self, data: &[u8]) -> Result<String> {
        let raw = self.extract_with_timeout(data)?;
        let text = normalize_text(&cleanup_pdf_text(&raw));

        if text.is_empty() {
            return Err(Error::Extraction(EMPTY_PDF_MESSAGE.to_string()));
        }

        tracing::debug!("Extracted {} chars from PDF", text.chars().count());
        Ok(text)
    }

    /// Count pages, if the document parses
    pub fn page_count(data: &[u8]) -> Option<usize> {
        lopdf::Document::load_mem(data)
            .ok()
            .map(|doc| doc.get_pages().len())
    }

    fn extract_with_timeout(&self, data: &[u8]) -> Result<String> {
        let data_vec = data.to_vec();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let result = pdf_extract::extract_text_from_mem(&data_vec);
            let _ = tx.send(result);
        });

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                let _ = handle.join();
                Ok(text)
            }
            Ok(Ok(_)) => {
                let _ = handle.join();
                tracing::warn!("pdf-extract returned no text, trying fallback");
                extract_text_fallback(data)
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                tracing::warn!("pdf-extract failed: {}, trying fallback", e);
                extract_text_fallback(data)
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // The extraction thread cannot be cancelled; it is left to finish on its own
                tracing::error!("PDF extraction timeout after {:?}", self.timeout);
                extract_text_fallback(data)
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                tracing::error!("PDF extraction thread crashed");
                extract_text_fallback(data)
            }
        }
    }
}

/// Fallback extraction reading `Tj`/`TJ` operands page by page with `lopdf`
fn extract_text_fallback(data: &[u8]) -> Result<String> {
    let doc = lopdf::Document::load_mem(data)
        .map_err(|e| Error::Extraction(format!("{}: {}", EMPTY_PDF_MESSAGE, e)))?;

    let mut all_text = String::new();
    for (page_num, page_id) in doc.get_pages() {
        match doc.get_page_content(page_id) {
            Ok(content) => {
                let text = text_from_content_stream(&content);
                if !text.is_empty() {
                    all_text.push_str(&text);
                    all_text.push('\n');
                }
            }
            Err(e) => {
                tracing::debug!("Could not get content for page {}: {}", page_num, e);
            }
        }
    }

    if all_text.trim().is_empty() {
        tracing::warn!("Fallback extraction produced no text, PDF may be image-based or encrypted");
        return Err(Error::Extraction(EMPTY_PDF_MESSAGE.to_string()));
    }

    Ok(all_text)
}

/// Collect literal strings shown between `BT` and `ET`
fn text_from_content_stream(content: &[u8]) -> String {
    let content_str = String::from_utf8_lossy(content);
    let mut text = String::new();
    let mut in_text_block = false;
    let mut current = String::new();

    for line in content_str.lines() {
        let line = line.trim();

        match line {
            "BT" => {
                in_text_block = true;
                continue;
            }
            "ET" => {
                in_text_block = false;
                if !current.is_empty() {
                    text.push_str(&current);
                    text.push(' ');
                    current.clear();
                }
                continue;
            }
            _ => {}
        }

        if in_text_block && (line.ends_with("Tj") || line.ends_with("TJ")) {
            if let (Some(start), Some(end)) = (line.find('('), line.rfind(')')) {
                if start < end {
                    let decoded = line[start + 1..end]
                        .replace("\\n", "\n")
                        .replace("\\(", "(")
                        .replace("\\)", ")")
                        .replace("\\\\", "\\");
                    current.push_str(&decoded);
                }
            }
        }
    }

    text.trim_end().to_string()
}

/// Replace leaked glyph names and typographic characters
fn cleanup_pdf_text(text: &str) -> String {
    let mut result = text.to_string();

    for (glyph, replacement) in GLYPH_NAMES {
        if result.contains(glyph) {
            result = result
                .replace(&format!("({})", glyph), replacement)
                .replace(&format!("<{}>", glyph), replacement);
        }
    }

    for (ch, replacement) in CHAR_FOLDS {
        if result.contains(*ch) {
            result = result.replace(*ch, replacement);
        }
    }

    result
}

/// Drop NULs, trim lines, drop blank lines
fn normalize_text(text: &str) -> String {
    text.replace('\0', "")
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
