//! PDF ingestion: text extraction and cleanup

mod pdf;

pub use pdf::PdfExtractor;
